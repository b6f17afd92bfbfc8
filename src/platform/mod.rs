//! Platform abstraction layer
//!
//! The simulation never touches a window, keyboard or disk. Everything it
//! needs from the outside world is one of the collaborator traits below:
//! - [`InputSource`] - per-tick commands
//! - [`Renderer`] - sprites, HUD, progress bar, boss health, pause overlay
//! - [`Screens`] - blocking modal screens at level exits
//! - [`time::TickPacer`] - fixed-rate frame pacing

pub mod headless;
pub mod time;

pub use headless::{Autopilot, LogRenderer, LogScreens, ScriptedInput};
pub use time::TickPacer;

use crate::level_distance;
use crate::sim::{Boss, LevelState, PlayerPose, Rect, TickInput};

/// Every drawable entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player(PlayerPose),
    Fireball,
    Egg,
    Log,
    Bird,
    PowerUp,
    /// Boss, tinted while its hit flash is active
    Boss { flashing: bool },
}

/// Values shown in the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    /// Whole seconds left in the power-up window, if active
    pub powerup_seconds: Option<u32>,
}

impl Hud {
    pub fn from_state(state: &LevelState, high_score: u64) -> Self {
        let player = &state.player;
        Self {
            level: state.level,
            score: state.score,
            high_score,
            powerup_seconds: player.can_shoot.then(|| player.powerup_seconds_left()),
        }
    }
}

/// Choice made on the level-complete screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCompleteChoice {
    Next,
    Menu,
}

pub trait InputSource {
    /// Commands for the coming tick
    fn poll(&mut self, state: &LevelState) -> TickInput;
}

pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    fn draw_hud(&mut self, hud: &Hud);
    /// Progress toward the level distance; not called on the boss level
    fn draw_progress_bar(&mut self, score: u64, level: u32);
    fn draw_boss_health(&mut self, boss: &Boss);
    fn draw_pause_overlay(&mut self);
    /// Finish the frame
    fn present(&mut self);
}

/// Modal screens; each call blocks until the player dismisses it
pub trait Screens {
    fn show_death(&mut self, score: u64, high_score: u64);
    fn show_level_complete(
        &mut self,
        level: u32,
        score: u64,
        high_score: u64,
        has_next: bool,
    ) -> LevelCompleteChoice;
    fn show_victory(&mut self, score: u64, high_score: u64);
}

/// Fraction of the level distance covered, `None` on the boss level
pub fn progress_fraction(score: u64, level: u32) -> Option<f32> {
    level_distance(level).map(|total| (score as f64 / total as f64).min(1.0) as f32)
}

/// Draw one full frame of the level, back to front
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, state: &LevelState, high_score: u64) {
    for obstacle in &state.obstacles {
        let sprite = if obstacle.is_flying() {
            Sprite::Bird
        } else {
            Sprite::Log
        };
        renderer.draw_sprite(sprite, *obstacle.rect());
    }
    for powerup in &state.powerups {
        renderer.draw_sprite(Sprite::PowerUp, powerup.rect);
    }
    if let Some(boss) = &state.boss {
        let flashing = boss.is_flashing();
        renderer.draw_sprite(Sprite::Boss { flashing }, boss.rect);
    }
    for egg in &state.boss_bullets {
        renderer.draw_sprite(Sprite::Egg, egg.rect);
    }
    for bullet in &state.bullets {
        renderer.draw_sprite(Sprite::Fireball, bullet.rect);
    }
    renderer.draw_sprite(Sprite::Player(state.player.pose), state.player.rect);

    renderer.draw_hud(&Hud::from_state(state, high_score));
    match &state.boss {
        Some(boss) => renderer.draw_boss_health(boss),
        None => renderer.draw_progress_bar(state.score, state.level),
    }
    renderer.present();
}
