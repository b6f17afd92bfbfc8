//! Cat Runner - A side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic level simulation (entities, boss FSM, collisions, spawning)
//! - `tuning`: Data-driven level balance
//! - `progress`: Unlocked levels and high score carried between levels
//! - `persistence`: JSON storage for the progress scalars
//! - `platform`: Input, drawing and modal-screen collaborators
//! - `app`: Level runner and progression shell

pub mod app;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{App, GameError, LevelExit};
pub use progress::ProgressState;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Timers and per-tick probabilities assume it.
    pub const FPS: u32 = 60;

    /// Score gained every simulated tick
    pub const SCORE_PER_TICK: u64 = 1;

    /// Number of levels; the last one is the boss fight
    pub const LEVEL_COUNT: u32 = 5;
    pub const BOSS_LEVEL: u32 = 5;

    /// Player sprite box
    pub const PLAYER_SIZE: (i32, i32) = (140, 140);
    /// Horizontal displacement per tick while a direction key is held
    pub const PLAYER_STEP: i32 = 6;
    /// Initial upward velocity of a jump
    pub const JUMP_VELOCITY: f32 = 10.0;
    /// Ticks the shooting pose is held after a shot
    pub const SHOOT_POSE_TICKS: u32 = 8;
    /// Length of the power-up window granted by a pickup
    pub const POWERUP_SECONDS: u32 = 10;

    pub const FIREBALL_SIZE: (i32, i32) = (64, 64);
    pub const FIREBALL_SPEED: i32 = 28;
    pub const EGG_SIZE: (i32, i32) = (98, 98);
    pub const POWERUP_SIZE: (i32, i32) = (110, 110);
    pub const BIRD_SIZE: (i32, i32) = (150, 100);
    pub const BOSS_SIZE: (i32, i32) = (320, 240);

    /// Boss collision box: shrink by inset, then shift by offset
    pub const BOSS_HITBOX_INSET: (i32, i32) = (140, 120);
    pub const BOSS_HITBOX_OFFSET: (i32, i32) = (-28, 0);
    pub const BOSS_MAX_HP: u32 = 170;

    /// Ground obstacle bounds
    pub const LOG_MIN_WIDTH: i32 = 60;
    pub const LOG_MAX_WIDTH: i32 = 160;
    pub const LOG_MIN_HEIGHT: i32 = 60;
}

/// Score needed to finish a level. `None` for the boss level, which only
/// ends when the boss is defeated.
pub fn level_distance(level: u32) -> Option<u64> {
    match level {
        1 => Some(1000),
        2 => Some(2000),
        3 => Some(3000),
        4 => Some(4200),
        5 => None,
        _ => Some(1000),
    }
}

/// Whether `level` names one of the playable levels
#[inline]
pub fn is_valid_level(level: u32) -> bool {
    (1..=consts::LEVEL_COUNT).contains(&level)
}
