//! The player's ship

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Entity, Status};
use super::shot::{Shot, ShotOwner};
use crate::consts::{MAX_SHIELD, PLAYER_SPAWN_X, PLAYER_SPAWN_Y, SHOT_SPEED};

/// Discretized movement request from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub dx: i32,
    pub dy: i32,
}

impl MoveIntent {
    pub const NONE: MoveIntent = MoveIntent { dx: 0, dy: 0 };
    pub const LEFT: MoveIntent = MoveIntent { dx: -1, dy: 0 };
    pub const RIGHT: MoveIntent = MoveIntent { dx: 1, dy: 0 };
    pub const UP: MoveIntent = MoveIntent { dx: 0, dy: -1 };
    pub const DOWN: MoveIntent = MoveIntent { dx: 0, dy: 1 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// The single player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShip {
    pub pos: IVec2,
    shield: u32,
    /// Ticks left before the next shot may be fired
    fire_cooldown: u32,
}

impl Default for PlayerShip {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerShip {
    pub fn new() -> Self {
        Self {
            pos: IVec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            shield: MAX_SHIELD,
            fire_cooldown: 0,
        }
    }

    /// Back to the spawn point with a full shield
    pub fn initialize(&mut self) {
        *self = Self::new();
    }

    /// Apply a movement intent, then clamp to the display
    pub fn move_by(&mut self, intent: MoveIntent, bounds: &Bounds) {
        if !self.is_active() {
            return;
        }
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        let moved = self.pos.saturating_add(IVec2::new(intent.dx, intent.dy));
        self.pos = bounds.clamp(moved);
    }

    /// Request an upward shot from the ship's position.
    ///
    /// Returns `None` while dead or cooling down. `cooldown_ticks` is the
    /// number of ticks before the next shot becomes available.
    pub fn fire(&mut self, cooldown_ticks: u32) -> Option<Shot> {
        if !self.is_active() || self.fire_cooldown > 0 {
            return None;
        }
        self.fire_cooldown = cooldown_ticks;
        Some(Shot::new(
            self.pos.as_vec2(),
            Vec2::new(0.0, -SHOT_SPEED),
            ShotOwner::Player,
        ))
    }

    /// Reduce shield, clamped at zero. Reaching zero explodes the ship.
    pub fn take_damage(&mut self, amount: u32) {
        if !self.is_active() {
            return;
        }
        self.shield = self.shield.saturating_sub(amount);
        if self.shield == 0 {
            self.explode();
        }
    }

    /// Restore shield, capped at full
    pub fn recharge(&mut self, amount: u32) {
        if !self.is_active() {
            return;
        }
        self.shield = (self.shield + amount).min(MAX_SHIELD);
    }

    pub fn explode(&mut self) {
        if self.shield != 0 {
            log::debug!("Player ship exploded at ({}, {})", self.pos.x, self.pos.y);
        }
        self.shield = 0;
    }

    pub fn shield_energy(&self) -> u32 {
        self.shield
    }
}

impl Entity for PlayerShip {
    fn position(&self) -> Vec2 {
        self.pos.as_vec2()
    }

    fn status(&self) -> Status {
        if self.shield > 0 {
            Status::Active
        } else {
            Status::Inactive
        }
    }
}
