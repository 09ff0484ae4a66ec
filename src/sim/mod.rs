//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod difficulty;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, detect_overlaps};
pub use combat::{CollisionEvent, apply_power_up, combo_multiplier, resolve, score_gain};
pub use pool::{Handle, Pool};
pub use state::{
    Enemy, EnemyStats, EntityKind, GameEvent, GamePhase, GameState, Patrol, Player, PlayerStats,
    Pools, PowerUp, PowerUpKind, Projectile,
};
pub use tick::{TickInput, tick};
pub use timer::{TimerKind, Timers};
