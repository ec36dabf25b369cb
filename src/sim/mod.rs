//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (time is the tick counter)
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve};
pub use entity::{EntityKind, Pilot, Plane, Steering, Weapon};
pub use projectile::{Owner, Projectile};
pub use spawner::{SpawnDecision, Spawner};
pub use state::{GameEvent, GamePhase, GameState, GameSummary};
pub use tick::{TickInput, tick};
