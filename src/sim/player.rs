//! The player character
//!
//! Jumping is a discrete per-tick arc, not a physics integration: each tick
//! the height changes by `2.5 × velocity` and the velocity drops by 0.5.
//! Once the velocity falls below `-JUMP_VELOCITY` the jump ends and the
//! player snaps back to the resting line. The arc is lopsided on purpose and
//! the constants must stay as they are to keep the feel of the jump.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Arena;
use crate::consts::*;

/// Visual pose, drives which sprite gets drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Running,
    Shooting,
}

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerControls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Sub-pixel height used while jumping; `rect.y` is its truncation
    pub y: f32,
    /// Resting `y` on the ground line
    pub rest_y: i32,
    pub jump_vel: f32,
    pub is_jumping: bool,
    pub pose: PlayerPose,
    /// Ticks left in the shooting pose
    pub shoot_timer: u32,
    pub can_shoot: bool,
    /// Ticks left in the power-up window
    pub powerup_ticks: i32,
    screen_width: i32,
}

impl Player {
    pub fn new(arena: &Arena) -> Self {
        let (w, h) = PLAYER_SIZE;
        let x = (arena.width as f32 * 0.08) as i32;
        let rest_y = arena.ground_y - h;
        Self {
            rect: Rect::new(x, rest_y, w, h),
            y: rest_y as f32,
            rest_y,
            jump_vel: JUMP_VELOCITY,
            is_jumping: false,
            pose: PlayerPose::Running,
            shoot_timer: 0,
            can_shoot: false,
            powerup_ticks: 0,
            screen_width: arena.width,
        }
    }

    /// Open the power-up window for `duration_seconds`
    pub fn activate_powerup(&mut self, duration_seconds: u32) {
        self.can_shoot = true;
        self.powerup_ticks = (duration_seconds * FPS) as i32;
    }

    /// Advance one tick with the given controls
    pub fn update(&mut self, controls: PlayerControls) {
        if self.can_shoot {
            self.powerup_ticks -= 1;
            if self.powerup_ticks <= 0 {
                self.can_shoot = false;
            }
        }

        if self.shoot_timer > 0 {
            self.shoot_timer -= 1;
            if self.shoot_timer == 0 {
                self.pose = PlayerPose::Running;
            }
        }

        if !self.is_jumping && controls.jump {
            self.is_jumping = true;
        }

        if self.is_jumping {
            self.y -= self.jump_vel * 2.5;
            self.jump_vel -= 0.5;

            if self.jump_vel < -JUMP_VELOCITY {
                self.is_jumping = false;
                self.jump_vel = JUMP_VELOCITY;
                self.y = self.rest_y as f32;
            }
        }

        self.rect.y = self.y as i32;

        if controls.right {
            self.rect.x += PLAYER_STEP;
        }
        if controls.left {
            self.rect.x -= PLAYER_STEP;
        }
        self.rect.x = self.rect.x.clamp(0, self.screen_width - self.rect.w);
    }

    /// Switch to the shooting pose. Spawning the fireball is the caller's job.
    pub fn shoot(&mut self) {
        self.pose = PlayerPose::Shooting;
        self.shoot_timer = SHOOT_POSE_TICKS;
    }

    /// Whole seconds left in the power-up window, for the HUD
    pub fn powerup_seconds_left(&self) -> u32 {
        if self.can_shoot {
            (self.powerup_ticks.max(0) as u32) / FPS
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(1920, 1080, 780)
    }

    #[test]
    fn test_player_starts_on_ground() {
        let player = Player::new(&arena());
        assert_eq!(player.rect.bottom(), 780);
        assert_eq!(player.rect.x, 153);
        assert!(!player.is_jumping);
    }

    #[test]
    fn test_jump_returns_to_rest() {
        let mut player = Player::new(&arena());
        let rest = player.rect.y;
        player.update(PlayerControls {
            jump: true,
            ..Default::default()
        });
        assert!(player.is_jumping);
        assert!(player.rect.y < rest);

        let mut ticks = 1;
        while player.is_jumping {
            player.update(PlayerControls::default());
            ticks += 1;
            assert!(ticks < 100, "jump never ended");
        }
        // Velocity steps 10, 9.5, ..., -10 and the jump ends at -10.5
        assert_eq!(ticks, 41);
        assert_eq!(player.rect.y, rest);
        assert_eq!(player.y, rest as f32);
        assert_eq!(player.jump_vel, JUMP_VELOCITY);
    }

    #[test]
    fn test_jump_not_retriggered_midair() {
        let mut player = Player::new(&arena());
        let jump = PlayerControls {
            jump: true,
            ..Default::default()
        };
        player.update(jump);
        player.update(jump);
        // Second press only continues the arc
        assert_eq!(player.jump_vel, JUMP_VELOCITY - 1.0);
    }

    #[test]
    fn test_powerup_window_expires() {
        let mut player = Player::new(&arena());
        player.activate_powerup(POWERUP_SECONDS);
        assert!(player.can_shoot);
        assert_eq!(player.powerup_ticks, 600);
        assert_eq!(player.powerup_seconds_left(), 10);

        for _ in 0..599 {
            player.update(PlayerControls::default());
        }
        assert!(player.can_shoot);
        player.update(PlayerControls::default());
        assert!(!player.can_shoot);
        assert_eq!(player.powerup_seconds_left(), 0);
    }

    #[test]
    fn test_shoot_pose_recovers() {
        let mut player = Player::new(&arena());
        player.shoot();
        assert_eq!(player.pose, PlayerPose::Shooting);
        for _ in 0..SHOOT_POSE_TICKS - 1 {
            player.update(PlayerControls::default());
        }
        assert_eq!(player.pose, PlayerPose::Shooting);
        player.update(PlayerControls::default());
        assert_eq!(player.pose, PlayerPose::Running);
    }

    #[test]
    fn test_clamped_at_left_edge() {
        let mut player = Player::new(&arena());
        for _ in 0..100 {
            player.update(PlayerControls {
                left: true,
                ..Default::default()
            });
        }
        assert_eq!(player.rect.x, 0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..600)) {
            let arena = arena();
            let mut player = Player::new(&arena);
            for (left, right, jump) in moves {
                player.update(PlayerControls { left, right, jump });
                prop_assert!(player.rect.x >= 0);
                prop_assert!(player.rect.x <= arena.width - player.rect.w);
                prop_assert!(player.rect.y <= player.rest_y);
            }
        }

        #[test]
        fn prop_jump_round_trip(start_x in 0i32..1780) {
            let mut player = Player::new(&arena());
            player.rect.x = start_x;
            let rest = player.rect.y;
            player.update(PlayerControls { jump: true, ..Default::default() });
            for _ in 0..40 {
                player.update(PlayerControls::default());
            }
            prop_assert!(!player.is_jumping);
            prop_assert_eq!(player.rect.y, rest);
            prop_assert_eq!(player.rect.x, start_x);
        }
    }
}
