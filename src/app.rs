//! Application shell
//!
//! Owns the settings, the progress store and the session's [`ProgressState`].
//! Runs one level at a time and drives progression with a plain loop: every
//! level run ends in a [`LevelExit`] that says where to go next.

use crate::consts::LEVEL_COUNT;
use crate::is_valid_level;
use crate::persistence::ProgressStore;
use crate::platform::{
    InputSource, LevelCompleteChoice, Renderer, Screens, TickPacer, draw_frame,
};
use crate::progress::ProgressState;
use crate::settings::Settings;
use crate::sim::{LevelState, TickOutcome, tick};

/// Where to go after a level run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelExit {
    /// Start this level next
    Continue(u32),
    ToMenu,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("No such level: {0}")]
    InvalidLevel(u32),

    #[error("Level {level} is locked ({unlocked} unlocked)")]
    LevelLocked { level: u32, unlocked: u32 },
}

/// The outside world a level talks to
pub struct Frontend<I, R, S> {
    pub input: I,
    pub renderer: R,
    pub screens: S,
    pub pacer: TickPacer,
}

impl<I: InputSource, R: Renderer, S: Screens> Frontend<I, R, S> {
    pub fn new(input: I, renderer: R, screens: S, pacer: TickPacer) -> Self {
        Self {
            input,
            renderer,
            screens,
            pacer,
        }
    }
}

pub struct App<S: ProgressStore> {
    settings: Settings,
    store: S,
    progress: ProgressState,
    base_seed: u64,
}

impl<S: ProgressStore> App<S> {
    pub fn new(settings: Settings, mut store: S) -> Self {
        let progress = ProgressState::load(&mut store);
        let base_seed = settings.resolve_seed();
        log::info!("Session seed {}", base_seed);
        Self {
            settings,
            store,
            progress,
            base_seed,
        }
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seed for one level run; distinct per level, fixed per session
    pub fn level_seed(&self, level: u32) -> u64 {
        self.base_seed
            .wrapping_add((level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Play from `level` until the player leaves for the menu or quits
    pub fn play_from<I, R, Sc>(
        &mut self,
        level: u32,
        frontend: &mut Frontend<I, R, Sc>,
    ) -> Result<LevelExit, GameError>
    where
        I: InputSource,
        R: Renderer,
        Sc: Screens,
    {
        if !is_valid_level(level) {
            return Err(GameError::InvalidLevel(level));
        }
        if !self.progress.is_unlocked(level) {
            return Err(GameError::LevelLocked {
                level,
                unlocked: self.progress.unlocked_levels,
            });
        }

        let mut level = level;
        loop {
            match self.run_level(level, frontend) {
                LevelExit::Continue(next) => level = next,
                exit => return Ok(exit),
            }
        }
    }

    /// Run a single level to its end
    pub fn run_level<I, R, Sc>(&mut self, level: u32, frontend: &mut Frontend<I, R, Sc>) -> LevelExit
    where
        I: InputSource,
        R: Renderer,
        Sc: Screens,
    {
        log::info!("Starting level {}", level);
        let mut state = LevelState::new(level, self.settings.arena(), self.level_seed(level));
        frontend.pacer.reset();

        loop {
            let input = frontend.input.poll(&state);
            let outcome = tick(&mut state, &input);

            match outcome {
                TickOutcome::Running => {
                    draw_frame(&mut frontend.renderer, &state, self.progress.high_score);
                }
                TickOutcome::Paused => {
                    frontend.renderer.draw_pause_overlay();
                    frontend.renderer.present();
                }
                _ => {
                    let exit = self.conclude(level, outcome, state.score, &mut frontend.screens);
                    log::info!("Level {} ended: {:?} -> {:?}", level, outcome, exit);
                    return exit;
                }
            }

            frontend.pacer.wait();
        }
    }

    /// Persist progress and show the matching screen for a level-ending outcome
    fn conclude<Sc: Screens>(
        &mut self,
        level: u32,
        outcome: TickOutcome,
        score: u64,
        screens: &mut Sc,
    ) -> LevelExit {
        match outcome {
            TickOutcome::LevelComplete => {
                self.unlock(level + 1);
                self.commit_score(score);
                let has_next = level < LEVEL_COUNT;
                let choice =
                    screens.show_level_complete(level, score, self.progress.high_score, has_next);
                match choice {
                    LevelCompleteChoice::Next if has_next => LevelExit::Continue(level + 1),
                    _ => LevelExit::ToMenu,
                }
            }
            TickOutcome::Victory => {
                self.unlock(LEVEL_COUNT);
                self.commit_score(score);
                screens.show_victory(score, self.progress.high_score);
                LevelExit::ToMenu
            }
            TickOutcome::Defeat(cause) => {
                log::info!("Defeated by {:?}", cause);
                self.commit_score(score);
                screens.show_death(score, self.progress.high_score);
                LevelExit::ToMenu
            }
            TickOutcome::Quit => {
                self.commit_score(score);
                LevelExit::Quit
            }
            TickOutcome::ToMenu | TickOutcome::Running | TickOutcome::Paused => {
                self.commit_score(score);
                LevelExit::ToMenu
            }
        }
    }

    /// Fold `score` into the high score and write it out
    fn commit_score(&mut self, score: u64) {
        if self.progress.record_score(score) {
            log::info!("New high score: {}", score);
        }
        self.store.save_highscore(self.progress.high_score);
    }

    /// Unlock up to `level`, persisting only when the count grows
    fn unlock(&mut self, level: u32) {
        if self.progress.unlock(level) {
            log::info!("Unlocked level {}", self.progress.unlocked_levels);
            self.store.save_unlocked_levels(self.progress.unlocked_levels);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::{LogRenderer, ScriptedInput};
    use crate::sim::{DefeatCause, TickInput};

    #[derive(Debug, Default)]
    struct RecordingScreens {
        deaths: Vec<(u64, u64)>,
        completions: Vec<(u32, u64, u64, bool)>,
        victories: Vec<(u64, u64)>,
        choice: Option<LevelCompleteChoice>,
    }

    impl Screens for RecordingScreens {
        fn show_death(&mut self, score: u64, high_score: u64) {
            self.deaths.push((score, high_score));
        }

        fn show_level_complete(
            &mut self,
            level: u32,
            score: u64,
            high_score: u64,
            has_next: bool,
        ) -> LevelCompleteChoice {
            self.completions.push((level, score, high_score, has_next));
            self.choice.unwrap_or(LevelCompleteChoice::Next)
        }

        fn show_victory(&mut self, score: u64, high_score: u64) {
            self.victories.push((score, high_score));
        }
    }

    fn settings() -> Settings {
        Settings {
            seed: Some(1234),
            realtime: false,
            ..Default::default()
        }
    }

    fn app_with(store: MemoryStore) -> App<MemoryStore> {
        App::new(settings(), store)
    }

    fn frontend(input: ScriptedInput) -> Frontend<ScriptedInput, LogRenderer, RecordingScreens> {
        Frontend::new(
            input,
            LogRenderer::default(),
            RecordingScreens::default(),
            TickPacer::unpaced(),
        )
    }

    #[test]
    fn test_idle_player_dies_and_score_is_saved() {
        let mut app = app_with(MemoryStore::default());
        let mut fe = frontend(ScriptedInput::new(Vec::new()));

        let exit = app.run_level(1, &mut fe);

        assert_eq!(exit, LevelExit::ToMenu);
        assert_eq!(fe.screens.deaths.len(), 1);
        let (score, high) = fe.screens.deaths[0];
        assert!(score > 0);
        assert_eq!(high, score);
        assert_eq!(app.store().highscore, score);
        assert_eq!(app.progress().unlocked_levels, 1);
        assert!(fe.renderer.frames > 0);
    }

    #[test]
    fn test_lower_score_keeps_old_high_score() {
        let mut app = app_with(MemoryStore {
            highscore: 1_000_000,
            ..Default::default()
        });
        let mut fe = frontend(ScriptedInput::new(Vec::new()));

        app.run_level(1, &mut fe);

        assert_eq!(fe.screens.deaths[0].1, 1_000_000);
        assert_eq!(app.store().highscore, 1_000_000);
    }

    #[test]
    fn test_quit_saves_and_exits() {
        let mut app = app_with(MemoryStore::default());
        let mut fe = frontend(ScriptedInput::new(Vec::new()).then_quit());

        assert_eq!(app.play_from(1, &mut fe), Ok(LevelExit::Quit));
        assert_eq!(app.store().saves, 1);
        assert!(fe.screens.deaths.is_empty());
    }

    #[test]
    fn test_pause_menu_exit() {
        let mut app = app_with(MemoryStore::default());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let to_menu = TickInput {
            to_menu: true,
            ..Default::default()
        };
        let mut fe = frontend(ScriptedInput::new([pause, TickInput::default(), to_menu]));

        assert_eq!(app.run_level(1, &mut fe), LevelExit::ToMenu);
        assert_eq!(fe.renderer.paused_frames, 2);
        assert_eq!(fe.renderer.frames, 2);
        assert_eq!(app.store().highscore, 0);
        assert_eq!(app.store().saves, 1);
    }

    #[test]
    fn test_level_complete_unlocks_next() {
        let mut app = app_with(MemoryStore::default());
        let mut screens = RecordingScreens::default();

        let exit = app.conclude(1, TickOutcome::LevelComplete, 1000, &mut screens);

        assert_eq!(exit, LevelExit::Continue(2));
        assert_eq!(screens.completions, vec![(1, 1000, 1000, true)]);
        assert_eq!(app.progress().unlocked_levels, 2);
        assert_eq!(app.store().unlocked_levels, 2);
        assert_eq!(app.store().highscore, 1000);
    }

    #[test]
    fn test_replaying_level_does_not_resave_unlock() {
        let mut app = app_with(MemoryStore {
            unlocked_levels: 4,
            ..Default::default()
        });
        let mut screens = RecordingScreens {
            choice: Some(LevelCompleteChoice::Menu),
            ..Default::default()
        };

        let exit = app.conclude(2, TickOutcome::LevelComplete, 2000, &mut screens);

        assert_eq!(exit, LevelExit::ToMenu);
        assert_eq!(app.progress().unlocked_levels, 4);
        // Only the high score was written
        assert_eq!(app.store().saves, 1);
    }

    #[test]
    fn test_level_four_leads_to_boss() {
        let mut app = app_with(MemoryStore {
            unlocked_levels: 4,
            ..Default::default()
        });
        let mut screens = RecordingScreens::default();

        let exit = app.conclude(4, TickOutcome::LevelComplete, 4200, &mut screens);

        assert_eq!(exit, LevelExit::Continue(5));
        assert_eq!(app.store().unlocked_levels, 5);
    }

    #[test]
    fn test_victory_unlocks_everything() {
        let mut app = app_with(MemoryStore::default());
        let mut screens = RecordingScreens::default();

        let exit = app.conclude(5, TickOutcome::Victory, 3000, &mut screens);

        assert_eq!(exit, LevelExit::ToMenu);
        assert_eq!(screens.victories, vec![(3000, 3000)]);
        assert_eq!(app.store().unlocked_levels, LEVEL_COUNT);
    }

    #[test]
    fn test_defeat_shows_death() {
        let mut app = app_with(MemoryStore::default());
        let mut screens = RecordingScreens::default();

        let outcome = TickOutcome::Defeat(DefeatCause::BossProjectile);
        assert_eq!(app.conclude(5, outcome, 77, &mut screens), LevelExit::ToMenu);
        assert_eq!(screens.deaths, vec![(77, 77)]);
        assert_eq!(app.store().unlocked_levels, 1);
    }

    #[test]
    fn test_play_from_rejects_bad_levels() {
        let mut app = app_with(MemoryStore::default());
        let mut fe = frontend(ScriptedInput::new(Vec::new()).then_quit());

        assert_eq!(app.play_from(0, &mut fe), Err(GameError::InvalidLevel(0)));
        assert_eq!(app.play_from(6, &mut fe), Err(GameError::InvalidLevel(6)));
        assert_eq!(
            app.play_from(3, &mut fe),
            Err(GameError::LevelLocked {
                level: 3,
                unlocked: 1
            })
        );
    }

    #[test]
    fn test_level_seeds_differ() {
        let app = app_with(MemoryStore::default());
        assert_ne!(app.level_seed(1), app.level_seed(2));
        assert_eq!(app.level_seed(1), app_with(MemoryStore::default()).level_seed(1));
    }
}
