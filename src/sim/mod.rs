//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] per frame)
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the entity vectors)
//! - No rendering, input, or storage dependencies

pub mod autopilot;
pub mod boss;
pub mod obstacle;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use boss::{Boss, BossState, SmashPhase};
pub use obstacle::{FlyingObstacle, GroundObstacle, Obstacle, PowerUp};
pub use player::{Player, PlayerControls, PlayerPose};
pub use projectile::{EnemyProjectile, Projectile};
pub use rect::Rect;
pub use state::{Arena, LevelState};
pub use tick::{DefeatCause, TickInput, TickOutcome, tick};
