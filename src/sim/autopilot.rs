//! Idle/demo mode: the game plays itself
//!
//! Reads the level state and produces the input a cautious player would:
//! jump over logs and low eggs, keep clear of the boss, fire whenever the
//! power-up window is open.

use super::state::LevelState;
use super::tick::TickInput;

/// Ticks of scrolling ahead of the player at which a log triggers a jump
const JUMP_LEAD_TICKS: i32 = 6;
/// Distance at which an incoming egg triggers a jump
const EGG_LEAD: i32 = 90;
/// Keep at least this gap to the boss hitbox
const BOSS_GAP: i32 = 60;
/// Ticks between shots while the power-up is active
const FIRE_EVERY: u64 = 6;

pub fn autopilot_input(state: &LevelState) -> TickInput {
    let player = &state.player.rect;
    let lead = state.tuning.scroll_speed * JUMP_LEAD_TICKS;

    let log_ahead = state.obstacles.iter().any(|o| {
        let gap = o.rect().x - player.right();
        !o.is_flying() && (0..=lead).contains(&gap)
    });

    let egg_ahead = state.boss_bullets.iter().any(|egg| {
        let gap = egg.rect.x - player.right();
        egg.rect.bottom() > player.y && (0..=EGG_LEAD).contains(&gap)
    });

    let boss_close = state
        .boss
        .as_ref()
        .is_some_and(|boss| boss.hitbox().x - player.right() < BOSS_GAP);

    let has_target = state.boss.is_some()
        || state
            .obstacles
            .iter()
            .any(|o| o.rect().x > player.right());

    TickInput {
        left: boss_close,
        jump: log_ahead || egg_ahead,
        shoot: state.player.can_shoot && has_target && state.ticks % FIRE_EVERY == 0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{GroundObstacle, Obstacle};
    use crate::sim::state::Arena;

    #[test]
    fn test_jumps_for_close_log() {
        let mut state = LevelState::new(1, Arena::default(), 3);
        assert!(!autopilot_input(&state).jump);

        let mut log = GroundObstacle::new(&state.arena, &mut state.rng);
        log.rect.x = state.player.rect.right() + 30;
        state.obstacles.push(Obstacle::Ground(log));
        assert!(autopilot_input(&state).jump);
    }

    #[test]
    fn test_fires_only_with_powerup() {
        let mut state = LevelState::new(5, Arena::default(), 3);
        assert!(!autopilot_input(&state).shoot);
        state.player.activate_powerup(10);
        assert!(autopilot_input(&state).shoot);
    }

    #[test]
    fn test_backs_off_from_boss() {
        let mut state = LevelState::new(5, Arena::default(), 3);
        assert!(!autopilot_input(&state).left);
        let hitbox_x = state.boss.as_ref().map(|b| b.hitbox().x).unwrap_or_default();
        state.player.rect.x = hitbox_x - state.player.rect.w - 10;
        assert!(autopilot_input(&state).left);
    }
}
