//! Fireballs (player) and eggs (boss)

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Arena;
use crate::consts::*;

/// A player fireball, flies straight to the right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
}

impl Projectile {
    /// Spawn with the left edge's midpoint at `(x, y)`
    pub fn new(x: i32, y: i32) -> Self {
        let (w, h) = FIREBALL_SIZE;
        Self {
            rect: Rect::new(x, y - h / 2, w, h),
        }
    }

    pub fn update(&mut self) {
        self.rect.x += FIREBALL_SPEED;
    }

    pub fn is_expired(&self, arena: &Arena) -> bool {
        self.rect.x > arena.width + 200
    }
}

/// Default egg velocity when the boss fires from the ground
pub const EGG_GROUND_VELOCITY: Vec2 = Vec2::new(-13.0, 0.0);

/// A boss egg. Velocity is fractional, movement is truncated per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProjectile {
    pub rect: Rect,
    pub vel: Vec2,
}

impl EnemyProjectile {
    /// Spawn centred on `center`
    pub fn new(center: IVec2, vel: Vec2) -> Self {
        let (w, h) = EGG_SIZE;
        Self {
            rect: Rect::from_center(center, w, h),
            vel,
        }
    }

    pub fn update(&mut self) {
        self.rect.x += self.vel.x as i32;
        self.rect.y += self.vel.y as i32;
    }

    pub fn is_expired(&self, arena: &Arena) -> bool {
        self.rect.right() < -50 || self.rect.y > arena.height + 200 || self.rect.bottom() < -200
    }
}
