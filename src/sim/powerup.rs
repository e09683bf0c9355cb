//! Power-up entity: a collectible that drifts down slowly

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Autonomous, Bounds, Entity, Status};
use crate::consts::POWER_UP_SPEED;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores part of the ship's shield
    ShieldRecharge,
    /// Flat score bonus
    ScoreBonus,
}

impl PowerUpKind {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            PowerUpKind::ShieldRecharge
        } else {
            PowerUpKind::ScoreBonus
        }
    }
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub status: Status,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            status: Status::Active,
        }
    }

    /// Picked up by the player
    pub fn collect(&mut self) {
        self.status = Status::Inactive;
    }
}

impl Entity for PowerUp {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl Autonomous for PowerUp {
    fn advance(&mut self, bounds: &Bounds) {
        if !self.is_active() {
            return;
        }
        self.pos.y += POWER_UP_SPEED;
        if bounds.below_bottom(self.pos.y) {
            self.status = Status::Inactive;
        }
    }
}
