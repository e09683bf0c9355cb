//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod powerup;
pub mod shot;
pub mod state;
pub mod tick;

pub use collision::{Kill, overlaps};
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Autonomous, Bounds, Entity, Status};
pub use player::{MoveIntent, PlayerShip};
pub use powerup::{PowerUp, PowerUpKind};
pub use shot::{Shot, ShotOwner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
