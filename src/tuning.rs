//! Data-driven level balance
//!
//! Every number that scales with the level number is derived here so the
//! tick loop reads one table instead of recomputing formulas.

use serde::{Deserialize, Serialize};

use crate::consts::BOSS_LEVEL;
use crate::level_distance;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTuning {
    pub level: u32,
    /// Score needed to finish; `None` on the boss level
    pub distance: Option<u64>,
    pub boss_level: bool,
    /// World scroll speed, pixels per tick
    pub scroll_speed: i32,
    /// First obstacle countdown
    pub initial_spawn_interval: i32,
    /// Base obstacle countdown before jitter
    pub base_spawn_interval: i32,
    /// Most obstacles alive at once
    pub max_obstacles: usize,
    /// Fraction of the screen width that must be clear behind the last obstacle
    pub min_spacing_ratio: f64,
    /// Chance a new obstacle is a bird
    pub flying_probability: f64,
    pub powerup_interval: i32,
    /// A power-up spawns when a roll in `0..=powerup_odds` hits 0
    pub powerup_odds: u32,
}

/// Obstacle cap on top of the level number
const BASE_MAX_OBSTACLES: usize = 5;
/// Obstacle countdown never drops below this
pub const MIN_SPAWN_INTERVAL: i32 = 18;
/// Score that shaves one tick off the obstacle countdown
pub const SCORE_PER_INTERVAL_TICK: u64 = 2000;

impl LevelTuning {
    pub fn for_level(level: u32) -> Self {
        let lvl = level.max(1) as i32;
        let distance = level_distance(level);
        let boss_level = level == BOSS_LEVEL;

        let mut flying_probability = (0.12 + 0.06 * (lvl - 1) as f64).min(0.5);
        if lvl >= 3 {
            flying_probability = (flying_probability + 0.06).min(0.45);
        }

        Self {
            level,
            distance,
            boss_level,
            scroll_speed: 12 + 2 * (lvl - 1),
            initial_spawn_interval: (64 - (lvl - 1) * 6).max(26),
            base_spawn_interval: (70 - lvl * 8).max(22),
            max_obstacles: BASE_MAX_OBSTACLES + level as usize,
            min_spacing_ratio: (0.35 - 0.03 * (lvl - 1) as f64).max(0.18),
            flying_probability,
            powerup_interval: if boss_level { 220 } else { 480 },
            powerup_odds: if boss_level { 1 } else { 3 },
        }
    }

    /// Clearance in pixels required between the last obstacle and the right edge
    pub fn min_spacing(&self, screen_width: i32) -> i32 {
        (screen_width as f64 * self.min_spacing_ratio) as i32
    }

    /// Next obstacle countdown from a jitter in `[-8, 12]` and the current score
    pub fn next_spawn_interval(&self, jitter: i32, score: u64) -> i32 {
        let interval = self.base_spawn_interval + jitter;
        let shortened = (score / SCORE_PER_INTERVAL_TICK).min(i32::MAX as u64) as i32;
        (interval - shortened).max(MIN_SPAWN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one() {
        let t = LevelTuning::for_level(1);
        assert_eq!(t.distance, Some(1000));
        assert!(!t.boss_level);
        assert_eq!(t.scroll_speed, 12);
        assert_eq!(t.initial_spawn_interval, 64);
        assert_eq!(t.base_spawn_interval, 62);
        assert_eq!(t.max_obstacles, 6);
        assert_eq!(t.min_spacing(1920), 672);
        assert!((t.flying_probability - 0.12).abs() < 1e-9);
        assert_eq!(t.powerup_interval, 480);
        assert_eq!(t.powerup_odds, 3);
    }

    #[test]
    fn test_level_three_bird_bonus() {
        let t = LevelTuning::for_level(3);
        assert!((t.flying_probability - 0.30).abs() < 1e-9);
        assert_eq!(t.base_spawn_interval, 46);
        assert_eq!(t.min_spacing(1920), 556);
    }

    #[test]
    fn test_boss_level() {
        let t = LevelTuning::for_level(5);
        assert_eq!(t.distance, None);
        assert!(t.boss_level);
        assert_eq!(t.scroll_speed, 20);
        assert_eq!(t.powerup_interval, 220);
        assert_eq!(t.powerup_odds, 1);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let t = LevelTuning::for_level(4);
        assert_eq!(t.base_spawn_interval, 38);
        assert_eq!(t.next_spawn_interval(0, 0), 38);
        assert_eq!(t.next_spawn_interval(-8, 4000), 28);
        assert_eq!(t.next_spawn_interval(-8, 1_000_000), MIN_SPAWN_INTERVAL);
    }
}
