//! Shared entity contract
//!
//! Every simulated object has a position and an Active/Inactive lifecycle.
//! Inactive entities never move, collide or draw, and their storage slot
//! may be reused by the next spawn of the same kind.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

/// The visible area of the display in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "display must be at least 1x1");
        Self { width, height }
    }

    /// Largest valid x coordinate
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.width as i32 - 1
    }

    /// Largest valid y coordinate
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.height as i32 - 1
    }

    /// Half-open containment: x in [0, width), y in [0, height)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width as f32 && pos.y >= 0.0 && pos.y < self.height as f32
    }

    /// True once a descending entity has passed the bottom row
    #[inline]
    pub fn below_bottom(&self, y: f32) -> bool {
        y > self.max_y() as f32
    }

    /// Clamp a pixel position to the inclusive display rectangle
    #[inline]
    pub fn clamp(&self, pos: IVec2) -> IVec2 {
        pos.clamp(IVec2::ZERO, IVec2::new(self.max_x(), self.max_y()))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(crate::consts::DISPLAY_WIDTH, crate::consts::DISPLAY_HEIGHT)
    }
}

/// Capability shared by the player, enemies, shots and power-ups
pub trait Entity {
    fn position(&self) -> Vec2;
    fn status(&self) -> Status;

    #[inline]
    fn is_active(&self) -> bool {
        self.status() == Status::Active
    }

    /// Pixel the entity is drawn at
    fn pixel(&self) -> IVec2 {
        self.position().floor().as_ivec2()
    }
}

/// Entities that move on their own every tick
pub trait Autonomous: Entity {
    /// Advance one tick. No-op when inactive; leaving the bounds deactivates.
    fn advance(&mut self, bounds: &Bounds);
}

/// Place `item` in the first inactive slot of `pool`, or append it.
///
/// Returns the slot index. Indices of other entries never change.
pub fn spawn_into<T: Entity>(pool: &mut Vec<T>, item: T) -> usize {
    match pool.iter().position(|e| !e.is_active()) {
        Some(slot) => {
            pool[slot] = item;
            slot
        }
        None => {
            pool.push(item);
            pool.len() - 1
        }
    }
}

/// Number of active entries in a pool
pub fn count_active<T: Entity>(pool: &[T]) -> usize {
    pool.iter().filter(|e| e.is_active()).count()
}
