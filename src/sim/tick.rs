//! Fixed timestep simulation tick
//!
//! Advances one level by exactly one tick. Order within a tick:
//! commands (shoot, pause), player, level-complete check, boss, projectiles,
//! obstacles and their spawning, power-ups, score.

use rand::Rng;

use super::obstacle::{FlyingObstacle, GroundObstacle, Obstacle, PowerUp};
use super::player::PlayerControls;
use super::projectile::Projectile;
use super::state::LevelState;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Shoot key pressed this tick (only works in the power-up window)
    pub shoot: bool,
    /// Pause key pressed this tick
    pub pause: bool,
    /// "Back to menu" chosen on the pause overlay
    pub to_menu: bool,
    /// Window closed
    pub quit: bool,
}

impl TickInput {
    pub fn controls(&self) -> PlayerControls {
        PlayerControls {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatCause {
    Obstacle,
    BossContact,
    BossProjectile,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Simulation advanced, keep going
    Running,
    /// Paused; nothing advanced
    Paused,
    /// Level distance reached
    LevelComplete,
    /// Boss hit points reached zero
    Victory,
    Defeat(DefeatCause),
    ToMenu,
    Quit,
}

impl TickOutcome {
    /// Whether the level loop must stop after this tick
    pub fn ends_level(&self) -> bool {
        !matches!(self, TickOutcome::Running | TickOutcome::Paused)
    }
}

/// Advance the level by one fixed tick
pub fn tick(state: &mut LevelState, input: &TickInput) -> TickOutcome {
    if input.quit {
        return TickOutcome::Quit;
    }

    if input.shoot && state.player.can_shoot && !state.paused {
        state.player.shoot();
        let rect = state.player.rect;
        state
            .bullets
            .push(Projectile::new(rect.right(), rect.center_y()));
    }

    if input.pause {
        state.paused = !state.paused;
    }

    // Paused: nothing advances, not even timers
    if state.paused {
        if input.to_menu {
            return TickOutcome::ToMenu;
        }
        return TickOutcome::Paused;
    }

    state.player.update(input.controls());

    if let Some(distance) = state.tuning.distance {
        if state.score >= distance {
            return TickOutcome::LevelComplete;
        }
    }

    if let Some(outcome) = update_boss(state) {
        return outcome;
    }

    if let Some(outcome) = resolve_projectiles(state) {
        return outcome;
    }

    if !state.is_boss_level() {
        spawn_obstacle_if_due(state);
        if let Some(outcome) = update_obstacles(state) {
            return outcome;
        }
    }

    spawn_powerup_if_due(state);
    update_powerups(state);

    state.score += SCORE_PER_TICK;
    state.ticks += 1;
    TickOutcome::Running
}

/// Boss movement, its shot decision, and the two ways the fight ends
fn update_boss(state: &mut LevelState) -> Option<TickOutcome> {
    let boss = state.boss.as_mut()?;
    let player = state.player.rect;

    boss.update(&player, &state.arena, &mut state.rng);

    if boss.should_shoot_now(&mut state.rng) {
        let egg = boss.spawn_egg(&player, &state.arena, &mut state.rng);
        state.boss_bullets.push(egg);
    }

    if boss.is_defeated() {
        return Some(TickOutcome::Victory);
    }

    if player.intersects(&boss.hitbox()) {
        return Some(TickOutcome::Defeat(DefeatCause::BossContact));
    }
    None
}

/// Move fireballs and eggs and apply every projectile collision.
///
/// Removals are deferred: entities hit this tick are masked out and
/// compacted after the pass, so later fireballs never see them.
fn resolve_projectiles(state: &mut LevelState) -> Option<TickOutcome> {
    let LevelState {
        arena,
        player,
        bullets,
        boss_bullets,
        obstacles,
        boss,
        ..
    } = state;

    let mut egg_alive = vec![true; boss_bullets.len()];
    let mut obstacle_alive = vec![true; obstacles.len()];

    bullets.retain_mut(|bullet| {
        bullet.update();

        let egg_hit = boss_bullets
            .iter()
            .enumerate()
            .find(|(i, egg)| egg_alive[*i] && bullet.rect.intersects(&egg.rect))
            .map(|(i, _)| i);
        if let Some(i) = egg_hit {
            egg_alive[i] = false;
            return false;
        }

        if let Some(boss) = boss.as_mut() {
            if bullet.rect.intersects(&boss.hitbox()) {
                boss.take_hit();
                return false;
            }
        }

        let obstacle_hit = obstacles
            .iter()
            .enumerate()
            .find(|(i, o)| obstacle_alive[*i] && bullet.rect.intersects(o.rect()))
            .map(|(i, _)| i);
        if let Some(i) = obstacle_hit {
            obstacle_alive[i] = false;
            return false;
        }

        !bullet.is_expired(arena)
    });

    let mut alive = egg_alive.into_iter();
    boss_bullets.retain(|_| alive.next().unwrap_or(true));
    let mut alive = obstacle_alive.into_iter();
    obstacles.retain(|_| alive.next().unwrap_or(true));

    for egg in boss_bullets.iter_mut() {
        egg.update();
        if egg.rect.intersects(&player.rect) {
            return Some(TickOutcome::Defeat(DefeatCause::BossProjectile));
        }
    }
    boss_bullets.retain(|egg| !egg.is_expired(arena));
    None
}

/// Obstacle spawn policy. When the countdown runs out, spawn only if below
/// the cap and the last obstacle has left enough room, then draw the next
/// countdown whether or not anything spawned.
pub fn spawn_obstacle_if_due(state: &mut LevelState) {
    state.obstacle_spawn_timer -= 1;
    if state.obstacle_spawn_timer > 0 {
        return;
    }

    let tuning = state.tuning;
    let limit = state.arena.width - tuning.min_spacing(state.arena.width);
    let has_room = state.rightmost_obstacle().is_none_or(|right| right <= limit);

    if state.obstacles.len() < tuning.max_obstacles && has_room {
        let obstacle = if state.rng.random_bool(tuning.flying_probability) {
            Obstacle::Flying(FlyingObstacle::new(&state.arena, &mut state.rng))
        } else {
            Obstacle::Ground(GroundObstacle::new(&state.arena, &mut state.rng))
        };
        log::debug!(
            "Spawned {} obstacle at tick {}",
            if obstacle.is_flying() { "flying" } else { "ground" },
            state.ticks
        );
        state.obstacles.push(obstacle);
    }

    let jitter = state.rng.random_range(-8..=12);
    state.obstacle_spawn_timer = tuning.next_spawn_interval(jitter, state.score);
}

fn update_obstacles(state: &mut LevelState) -> Option<TickOutcome> {
    let speed = state.tuning.scroll_speed;
    let time_ms = state.time_ms();
    for obstacle in state.obstacles.iter_mut() {
        obstacle.update(speed, time_ms);
        if state.player.rect.intersects(obstacle.rect()) {
            return Some(TickOutcome::Defeat(DefeatCause::Obstacle));
        }
    }
    state.obstacles.retain(|o| !o.is_expired());
    None
}

/// Power-up spawn policy: at most one alive; when the countdown has run
/// out, roll the level's odds and restart the countdown.
pub fn spawn_powerup_if_due(state: &mut LevelState) {
    state.powerup_spawn_timer -= 1;
    if state.powerup_spawn_timer > 0 || !state.powerups.is_empty() {
        return;
    }

    if state.rng.random_range(0..=state.tuning.powerup_odds) == 0 {
        log::debug!("Spawned power-up at tick {}", state.ticks);
        state.powerups.push(PowerUp::new(&state.arena));
    }
    state.powerup_spawn_timer = state.tuning.powerup_interval;
}

fn update_powerups(state: &mut LevelState) {
    let speed = state.tuning.scroll_speed;
    let time_ms = state.time_ms();
    let player = &mut state.player;
    state.powerups.retain_mut(|powerup| {
        powerup.update(speed, time_ms);
        if player.rect.intersects(&powerup.rect) {
            player.activate_powerup(POWERUP_SECONDS);
            return false;
        }
        !powerup.is_expired()
    });
}
