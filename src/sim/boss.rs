//! The boss and its behaviour state machine
//!
//! The boss patrols in `Normal` and, whenever its countdown elapses, picks
//! one of three attacks (smash, dash, shooting burst). Every attack ends in
//! `Returning`, which steers back to the anchor and hands control back to
//! `Normal`. A hit during smash or dash interrupts the attack with a fast
//! `Recoil` toward the anchor.
//!
//! Reaching zero hit points is not a state here; the level loop watches `hp`.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::{EGG_GROUND_VELOCITY, EnemyProjectile};
use super::rect::Rect;
use super::state::Arena;
use crate::consts::*;

/// Horizontal patrol speed in `Normal`
pub const PATROL_SPEED: i32 = 4;
/// Patrol bounces when this close to a side
pub const PATROL_MARGIN: i32 = 20;
/// Vertical tracking of the player in `Normal`
pub const TRACK_DEADZONE: i32 = 20;
pub const TRACK_STEP: i32 = 2;

pub const SMASH_RISE_STEP: i32 = 6;
pub const SMASH_ALIGN_STEP: i32 = 8;
pub const SMASH_ALIGN_TOLERANCE: i32 = 80;
pub const SMASH_WAIT_TICKS: u32 = 20;
pub const SMASH_FALL_STEP: i32 = 12;
/// How far below the ground line the smash lands
pub const SMASH_GROUND_OVERSHOOT: i32 = 8;
pub const SMASH_MIN_TICKS: i32 = 140;

pub const DASH_SPEED: i32 = 26;
pub const DASH_MARGIN: i32 = 10;
pub const DASH_MIN_TICKS: i32 = 80;

pub const BURST_SHOTS: u32 = 3;
pub const BURST_COOLDOWN: i32 = 40;

pub const RETURN_STEP: f32 = 12.0;
pub const RETURN_SNAP_DISTANCE: f32 = 8.0;
pub const RECOIL_STEP: f32 = 16.0;
pub const RECOIL_HANDOFF_DISTANCE: f32 = 60.0;

pub const HIT_FLASH_TICKS: u32 = 10;

/// Countdown range drawn for the next decision
pub const DECISION_TICKS_MIN: i32 = 160;
pub const DECISION_TICKS_MAX: i32 = 240;

/// Per-tick chance of a stray shot: 1 in (N + 1)
pub const NORMAL_SHOT_ODDS: u32 = 420;
pub const DASH_SHOT_ODDS: u32 = 600;

/// Sub-phases of the smash attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmashPhase {
    /// Rise to the ceiling
    Up,
    /// Slide over the player
    Align,
    /// Hover before dropping
    Wait { ticks_left: u32 },
    /// Drop onto the ground
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Normal,
    Smash { phase: SmashPhase },
    /// `direction` is -1 (left) or 1 (right); `None` charges at the player
    Dash { direction: Option<i32> },
    ShootPause { cooldown: i32, burst: u32 },
    Returning,
    Recoil,
}

impl BossState {
    pub fn name(&self) -> &'static str {
        match self {
            BossState::Normal => "normal",
            BossState::Smash { .. } => "smash",
            BossState::Dash { .. } => "dash",
            BossState::ShootPause { .. } => "shoot_pause",
            BossState::Returning => "returning",
            BossState::Recoil => "recoil",
        }
    }

    /// Smash and dash can be interrupted by a hit
    pub fn is_interruptible(&self) -> bool {
        matches!(self, BossState::Smash { .. } | BossState::Dash { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    /// Visual box; collisions use [`Boss::hitbox`]
    pub rect: Rect,
    /// Home position (top-left) the boss returns to
    pub anchor: IVec2,
    pub hp: u32,
    pub max_hp: u32,
    pub speed_x: i32,
    pub state: BossState,
    /// Countdown to the next decision (and smash timeout)
    pub state_timer: i32,
    pub hit_timer: u32,
}

impl Boss {
    pub fn new(arena: &Arena) -> Self {
        let (w, h) = BOSS_SIZE;
        let anchor = IVec2::new(arena.width - 360, Self::anchor_y(arena.height));
        Self {
            rect: Rect::new(anchor.x, anchor.y, w, h),
            anchor,
            hp: BOSS_MAX_HP,
            max_hp: BOSS_MAX_HP,
            speed_x: PATROL_SPEED,
            state: BossState::Normal,
            state_timer: 180,
            hit_timer: 0,
        }
    }

    /// Home height (top edge) for a screen of the given height
    pub fn anchor_y(screen_height: i32) -> i32 {
        screen_height * 28 / 100
    }

    /// Shrunken, shifted collision box
    pub fn hitbox(&self) -> Rect {
        self.rect
            .inflate(-BOSS_HITBOX_INSET.0, -BOSS_HITBOX_INSET.1)
            .translate(BOSS_HITBOX_OFFSET.0, BOSS_HITBOX_OFFSET.1)
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_timer > 0
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    fn enter(&mut self, next: BossState) {
        if self.state.name() != next.name() {
            log::debug!("Boss {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }

    /// Advance the state machine by one tick
    pub fn update<R: Rng>(&mut self, player: &Rect, arena: &Arena, rng: &mut R) {
        self.state_timer -= 1;
        self.hit_timer = self.hit_timer.saturating_sub(1);

        match self.state {
            BossState::Normal => {
                if self.state_timer <= 0 {
                    self.choose_next_state(arena, rng);
                }
                // Patrol still applies on the tick a new attack is chosen
                self.patrol(player, arena);
            }
            BossState::Smash { phase } => {
                if self.state_timer <= 0 {
                    self.enter(BossState::Returning);
                } else {
                    self.smash(phase, player, arena);
                }
            }
            BossState::Dash { direction } => self.dash(direction, player, arena),
            BossState::ShootPause { cooldown, burst } => {
                if burst == 0 {
                    self.enter(BossState::Returning);
                } else {
                    self.state = BossState::ShootPause {
                        cooldown: cooldown - 1,
                        burst,
                    };
                }
            }
            BossState::Returning => self.update_returning(rng),
            BossState::Recoil => {
                if self.anchor_offset().length() < RECOIL_HANDOFF_DISTANCE {
                    self.enter(BossState::Returning);
                } else {
                    self.steer_to_anchor(RECOIL_STEP);
                }
            }
        }

        self.rect.y = self
            .rect
            .y
            .clamp(arena.boss_ceiling(), arena.boss_floor());
    }

    /// Draw a new countdown and pick the next attack
    pub fn choose_next_state<R: Rng>(&mut self, arena: &Arena, rng: &mut R) {
        self.state_timer = rng.random_range(DECISION_TICKS_MIN..=DECISION_TICKS_MAX);
        let roll: f32 = rng.random();
        if roll < 0.35 {
            self.enter(BossState::Smash {
                phase: SmashPhase::Up,
            });
            self.state_timer = self.state_timer.max(SMASH_MIN_TICKS);
        } else if roll < 0.7 {
            // Charge across toward the far side
            let direction = if self.rect.center_x() > arena.width / 2 {
                -1
            } else {
                1
            };
            self.enter(BossState::Dash {
                direction: Some(direction),
            });
            self.state_timer = self.state_timer.max(DASH_MIN_TICKS);
        } else {
            self.enter(BossState::ShootPause {
                cooldown: BURST_COOLDOWN,
                burst: BURST_SHOTS,
            });
        }
    }

    fn patrol(&mut self, player: &Rect, arena: &Arena) {
        self.rect.x += self.speed_x;
        if self.rect.right() >= arena.width - PATROL_MARGIN || self.rect.x <= PATROL_MARGIN {
            self.speed_x = -self.speed_x;
        }

        let target = player.center_y();
        if self.rect.center_y() < target - TRACK_DEADZONE {
            self.rect.y += TRACK_STEP;
        } else if self.rect.center_y() > target + TRACK_DEADZONE {
            self.rect.y -= TRACK_STEP;
        }
    }

    fn smash(&mut self, phase: SmashPhase, player: &Rect, arena: &Arena) {
        let next = match phase {
            SmashPhase::Up => {
                self.rect.y -= SMASH_RISE_STEP;
                if self.rect.y <= arena.boss_ceiling() {
                    SmashPhase::Align
                } else {
                    SmashPhase::Up
                }
            }
            SmashPhase::Align => {
                let target = player.center_x();
                if self.rect.center_x() > target + SMASH_ALIGN_TOLERANCE {
                    self.rect.x -= SMASH_ALIGN_STEP;
                    SmashPhase::Align
                } else if self.rect.center_x() < target - SMASH_ALIGN_TOLERANCE {
                    self.rect.x += SMASH_ALIGN_STEP;
                    SmashPhase::Align
                } else {
                    SmashPhase::Wait {
                        ticks_left: SMASH_WAIT_TICKS,
                    }
                }
            }
            SmashPhase::Wait { ticks_left } => {
                let ticks_left = ticks_left.saturating_sub(1);
                if ticks_left == 0 {
                    SmashPhase::Down
                } else {
                    SmashPhase::Wait { ticks_left }
                }
            }
            SmashPhase::Down => {
                self.rect.y += SMASH_FALL_STEP;
                let landing = arena.ground_y + SMASH_GROUND_OVERSHOOT;
                if self.rect.bottom() >= landing {
                    self.rect.set_bottom(landing);
                    self.enter(BossState::Returning);
                    return;
                }
                SmashPhase::Down
            }
        };
        self.state = BossState::Smash { phase: next };
    }

    fn dash(&mut self, direction: Option<i32>, player: &Rect, arena: &Arena) {
        let direction = direction.unwrap_or(if self.rect.center_x() > player.center_x() {
            -1
        } else {
            1
        });
        self.state = BossState::Dash {
            direction: Some(direction),
        };

        self.rect.x += DASH_SPEED * direction;
        if self.rect.right() >= arena.width - DASH_MARGIN || self.rect.x <= DASH_MARGIN {
            self.enter(BossState::Returning);
        }
    }

    fn update_returning<R: Rng>(&mut self, rng: &mut R) {
        let dist = self.anchor_offset().length();
        if dist < RETURN_SNAP_DISTANCE {
            self.rect.x = self.anchor.x;
            self.rect.y = self.anchor.y;
            self.state_timer = rng.random_range(DECISION_TICKS_MIN..=DECISION_TICKS_MAX);
            self.speed_x = PATROL_SPEED;
            self.enter(BossState::Normal);
            return;
        }
        self.steer_to_anchor(RETURN_STEP);
    }

    fn anchor_offset(&self) -> Vec2 {
        (self.anchor - self.rect.top_left()).as_vec2()
    }

    /// Move `step` pixels toward the anchor, truncating each axis
    fn steer_to_anchor(&mut self, step: f32) {
        let offset = self.anchor_offset();
        let dist = offset.length();
        if dist > 0.0 {
            let delta = offset * step / dist;
            self.rect.x += delta.x as i32;
            self.rect.y += delta.y as i32;
        }
    }

    /// Whether an egg should be fired this tick. In a burst this consumes a
    /// shot; in `Normal` and `Dash` it is a small per-tick chance.
    pub fn should_shoot_now<R: Rng>(&mut self, rng: &mut R) -> bool {
        match self.state {
            BossState::ShootPause { cooldown, burst } => {
                if cooldown <= 0 && burst > 0 {
                    self.state = BossState::ShootPause {
                        cooldown: BURST_COOLDOWN,
                        burst: burst - 1,
                    };
                    return true;
                }
                false
            }
            BossState::Normal => rng.random_range(0..=NORMAL_SHOT_ODDS) == 0,
            BossState::Dash { .. } => rng.random_range(0..=DASH_SHOT_ODDS) == 0,
            _ => false,
        }
    }

    /// Build the egg for a shot. From the ground it rolls straight left;
    /// from the air it arcs toward the player.
    pub fn spawn_egg<R: Rng>(&self, player: &Rect, arena: &Arena, rng: &mut R) -> EnemyProjectile {
        let on_ground = self.rect.bottom() >= arena.ground_y - 2;
        let offset_y = rng.random_range(-34..=34);
        let vel = if on_ground {
            EGG_GROUND_VELOCITY
        } else {
            let dy = (player.center_y() - self.rect.center_y()) as f32;
            Vec2::new(-10.0, (dy * 0.06).clamp(-2.0, 8.0))
        };
        let center = IVec2::new(self.rect.x - 20, self.rect.center_y() + offset_y);
        EnemyProjectile::new(center, vel)
    }

    /// Register a hit: lose one point, flash, and abort smash or dash
    pub fn take_hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
        self.hit_timer = HIT_FLASH_TICKS;
        if self.state.is_interruptible() {
            self.enter(BossState::Recoil);
        }
    }
}
