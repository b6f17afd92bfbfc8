//! Scrolling hazards and the power-up pickup
//!
//! Bobbing motion is driven by simulation time (milliseconds derived from
//! the tick counter), so a seeded level replays identically.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Arena;
use crate::consts::*;

/// A log lying on the ground, random size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundObstacle {
    pub rect: Rect,
}

impl GroundObstacle {
    pub fn new<R: Rng>(arena: &Arena, rng: &mut R) -> Self {
        let width = rng.random_range(LOG_MIN_WIDTH..=LOG_MAX_WIDTH);
        // Never much taller than the player, never above a third of the screen
        let max_height = (PLAYER_SIZE.1 * 105 / 100)
            .min(arena.height * 33 / 100)
            .max(LOG_MIN_HEIGHT);
        let height = rng.random_range(LOG_MIN_HEIGHT..=max_height);
        let mut rect = Rect::new(arena.width + 50, 0, width, height);
        rect.set_bottom(arena.ground_y);
        Self { rect }
    }
}

/// Altitudes a bird can fly at, measured up from the ground line
pub const BIRD_ALTITUDES: [i32; 3] = [200, 280, 360];

/// A bird at one of three altitudes, bobbing as it flies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyingObstacle {
    pub rect: Rect,
    /// Phase offset of the bob, radians
    pub wave_offset: f32,
}

impl FlyingObstacle {
    pub fn new<R: Rng>(arena: &Arena, rng: &mut R) -> Self {
        let altitude = BIRD_ALTITUDES[rng.random_range(0..BIRD_ALTITUDES.len())];
        let (w, h) = BIRD_SIZE;
        Self {
            rect: Rect::new(arena.width + 50, arena.ground_y - altitude, w, h),
            wave_offset: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Obstacle {
    Ground(GroundObstacle),
    Flying(FlyingObstacle),
}

impl Obstacle {
    pub fn rect(&self) -> &Rect {
        match self {
            Obstacle::Ground(o) => &o.rect,
            Obstacle::Flying(o) => &o.rect,
        }
    }

    /// Scroll left by `speed`; birds also bob
    pub fn update(&mut self, speed: i32, time_ms: f32) {
        match self {
            Obstacle::Ground(o) => o.rect.x -= speed,
            Obstacle::Flying(o) => {
                o.rect.x -= speed;
                o.rect.y += ((time_ms * 0.005 + o.wave_offset).sin() * 2.0) as i32;
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.rect().x < -200
    }

    pub fn is_flying(&self) -> bool {
        matches!(self, Obstacle::Flying(_))
    }
}

/// The floating pickup that opens the power-up window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    base: IVec2,
}

impl PowerUp {
    /// Enter from the right edge, floating above the ground
    pub fn new(arena: &Arena) -> Self {
        Self::spawn_at(IVec2::new(arena.width + 80, arena.ground_y - 140))
    }

    pub fn spawn_at(base: IVec2) -> Self {
        let (w, h) = POWERUP_SIZE;
        Self {
            rect: Rect::from_center(base, w, h),
            base,
        }
    }

    pub fn update(&mut self, speed: i32, time_ms: f32) {
        self.base.x -= speed;
        // Truncate the bobbed position, not the offset
        let center_y = (self.base.y as f32 + (time_ms / 400.0).sin() * 12.0) as i32;
        self.rect.set_center(IVec2::new(self.base.x, center_y));
    }

    pub fn is_expired(&self) -> bool {
        self.rect.right() < -100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(1920, 1080, 780)
    }

    #[test]
    fn test_ground_obstacle_bounds() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let log = GroundObstacle::new(&arena, &mut rng);
            assert!((LOG_MIN_WIDTH..=LOG_MAX_WIDTH).contains(&log.rect.w));
            assert!((LOG_MIN_HEIGHT..=147).contains(&log.rect.h));
            assert_eq!(log.rect.bottom(), arena.ground_y);
            assert_eq!(log.rect.x, arena.width + 50);
        }
    }

    #[test]
    fn test_bird_altitudes() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let bird = FlyingObstacle::new(&arena, &mut rng);
            let altitude = arena.ground_y - bird.rect.y;
            assert!(BIRD_ALTITUDES.contains(&altitude));
            assert!((0.0..std::f32::consts::TAU).contains(&bird.wave_offset));
        }
    }

    #[test]
    fn test_bird_bob_is_small() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bird = Obstacle::Flying(FlyingObstacle::new(&arena, &mut rng));
        let y0 = bird.rect().y;
        bird.update(12, 1000.0);
        assert_eq!(bird.rect().x, arena.width + 50 - 12);
        assert!((bird.rect().y - y0).abs() <= 2);
    }

    #[test]
    fn test_obstacle_expires_off_left() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut log = Obstacle::Ground(GroundObstacle::new(&arena, &mut rng));
        log.update(arena.width + 250, 0.0);
        assert!(!log.is_expired());
        log.update(1, 0.0);
        assert!(log.is_expired());
    }

    #[test]
    fn test_powerup_floats_around_base() {
        let arena = arena();
        let mut p = PowerUp::new(&arena);
        assert_eq!(p.rect.center(), IVec2::new(2000, 640));
        p.update(12, 628.0);
        assert_eq!(p.rect.center_x(), 1988);
        assert!((p.rect.center_y() - 640).abs() <= 12);
    }

    #[test]
    fn test_powerup_bob_truncates_position() {
        let mut p = PowerUp::new(&arena());
        // 12 * sin(1273.3 / 400) is just under -0.5
        p.update(0, 1273.3);
        assert_eq!(p.rect.center_y(), 639);
        p.update(0, 0.0);
        assert_eq!(p.rect.center_y(), 640);
    }
}
