//! Level state and core simulation types
//!
//! Everything a level mutates lives in [`LevelState`]. The screen geometry
//! and ground line are fixed for the level and carried in [`Arena`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::obstacle::{Obstacle, PowerUp};
use super::player::Player;
use super::projectile::{EnemyProjectile, Projectile};
use crate::consts::{BOSS_SIZE, FPS, PLAYER_SIZE};
use crate::tuning::LevelTuning;

/// How far below the ground line the boss's top edge may sink
const BOSS_FLOOR_BELOW_GROUND: i32 = 40;

/// Screen size and ground line for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    /// Screen y of the ground surface
    pub ground_y: i32,
}

/// Narrowest screen that still fits the boss's home position and patrol
pub const MIN_ARENA_WIDTH: i32 = 2 * BOSS_SIZE.0;
pub const MIN_ARENA_HEIGHT: i32 = BOSS_SIZE.1 + PLAYER_SIZE.1;

impl Arena {
    /// Build an arena, pulling out-of-range geometry back into a playable one.
    ///
    /// The ground line may not sit so high that the boss's home position
    /// falls below the lowest point the boss is allowed to reach.
    pub fn new(width: i32, height: i32, ground_y: i32) -> Self {
        let fixed_width = width.max(MIN_ARENA_WIDTH);
        let fixed_height = height.max(MIN_ARENA_HEIGHT);
        let fixed_ground = ground_y.clamp(Self::lowest_ground(fixed_height), fixed_height);

        if (fixed_width, fixed_height, fixed_ground) != (width, height, ground_y) {
            log::warn!(
                "Arena {}x{} ground {} is unplayable, using {}x{} ground {}",
                width,
                height,
                ground_y,
                fixed_width,
                fixed_height,
                fixed_ground
            );
        }

        Self {
            width: fixed_width,
            height: fixed_height,
            ground_y: fixed_ground,
        }
    }

    /// Smallest ground line that keeps the boss anchor inside its vertical band
    fn lowest_ground(height: i32) -> i32 {
        Boss::anchor_y(height) - BOSS_FLOOR_BELOW_GROUND
    }

    /// Highest the boss may fly (top edge)
    pub fn boss_ceiling(&self) -> i32 {
        self.height * 12 / 100
    }

    /// Lowest the boss's top edge may sink
    pub fn boss_floor(&self) -> i32 {
        self.ground_y + BOSS_FLOOR_BELOW_GROUND
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1920, 1080, 780)
    }
}

/// Complete state of one level run (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct LevelState {
    /// Level number, 1-based
    pub level: u32,
    pub arena: Arena,
    pub tuning: LevelTuning,
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulated ticks (paused ticks are not counted)
    pub ticks: u64,
    pub score: u64,
    pub paused: bool,
    pub player: Player,
    /// Player fireballs
    pub bullets: Vec<Projectile>,
    /// Boss eggs
    pub boss_bullets: Vec<EnemyProjectile>,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    pub boss: Option<Boss>,
    pub obstacle_spawn_timer: i32,
    pub powerup_spawn_timer: i32,
}

impl LevelState {
    /// Fresh level: player on the ground, score 0, boss present on the boss level
    pub fn new(level: u32, arena: Arena, seed: u64) -> Self {
        let tuning = LevelTuning::for_level(level);
        let boss = tuning.boss_level.then(|| Boss::new(&arena));
        Self {
            level,
            arena,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            score: 0,
            paused: false,
            player: Player::new(&arena),
            bullets: Vec::new(),
            boss_bullets: Vec::new(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            boss,
            obstacle_spawn_timer: tuning.initial_spawn_interval,
            powerup_spawn_timer: 0,
        }
    }

    pub fn is_boss_level(&self) -> bool {
        self.boss.is_some()
    }

    /// Simulation clock in milliseconds, drives bobbing animations
    pub fn time_ms(&self) -> f32 {
        self.ticks as f32 * 1000.0 / FPS as f32
    }

    /// Right edge of the rightmost obstacle, if any
    pub fn rightmost_obstacle(&self) -> Option<i32> {
        self.obstacles.iter().map(|o| o.rect().right()).max()
    }
}
