//! Windowless collaborators
//!
//! Used by the native demo binary and by tests: the autopilot and scripted
//! input sources, a renderer that only logs, and screens that answer
//! immediately.

use std::collections::VecDeque;

use super::{Hud, InputSource, LevelCompleteChoice, Renderer, Screens, Sprite, progress_fraction};
use crate::sim::{Boss, LevelState, Rect, TickInput, autopilot_input};

/// Idle/demo input: the level plays itself
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self, state: &LevelState) -> TickInput {
        autopilot_input(state)
    }
}

/// Replays a fixed list of inputs, then idles (or quits, if asked to)
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
            quit_when_done: false,
        }
    }

    /// Send `quit` once the script runs out
    pub fn then_quit(mut self) -> Self {
        self.quit_when_done = true;
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &LevelState) -> TickInput {
        self.queue.pop_front().unwrap_or(TickInput {
            quit: self.quit_when_done,
            ..Default::default()
        })
    }
}

/// Renderer that draws nothing; the HUD goes to the trace log
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
    pub paused_frames: u64,
    sprites_this_frame: usize,
}

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, _sprite: Sprite, _rect: Rect) {
        self.sprites_this_frame += 1;
    }

    fn draw_hud(&mut self, hud: &Hud) {
        log::trace!(
            "L{} score {} best {} power {:?}",
            hud.level,
            hud.score,
            hud.high_score,
            hud.powerup_seconds
        );
    }

    fn draw_progress_bar(&mut self, score: u64, level: u32) {
        if let Some(fraction) = progress_fraction(score, level) {
            log::trace!("L{} progress {:.0}%", level, fraction * 100.0);
        }
    }

    fn draw_boss_health(&mut self, boss: &Boss) {
        log::trace!("Boss {}/{} ({})", boss.hp, boss.max_hp, boss.state.name());
    }

    fn draw_pause_overlay(&mut self) {
        self.paused_frames += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
        log::trace!("Frame {}: {} sprites", self.frames, self.sprites_this_frame);
        self.sprites_this_frame = 0;
    }
}

/// Screens that log and answer straight away
#[derive(Debug, Clone)]
pub struct LogScreens {
    /// Answer given on the level-complete screen when a next level exists
    pub choice: LevelCompleteChoice,
}

impl Default for LogScreens {
    fn default() -> Self {
        Self {
            choice: LevelCompleteChoice::Next,
        }
    }
}

impl Screens for LogScreens {
    fn show_death(&mut self, score: u64, high_score: u64) {
        log::info!("Game over: score {} (best {})", score, high_score);
    }

    fn show_level_complete(
        &mut self,
        level: u32,
        score: u64,
        high_score: u64,
        has_next: bool,
    ) -> LevelCompleteChoice {
        log::info!(
            "Level {} complete: score {} (best {})",
            level,
            score,
            high_score
        );
        if has_next {
            self.choice
        } else {
            LevelCompleteChoice::Menu
        }
    }

    fn show_victory(&mut self, score: u64, high_score: u64) {
        log::info!("Victory! Score {} (best {})", score, high_score);
    }
}
