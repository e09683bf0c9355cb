//! Shot entity: a projectile moving along a fixed velocity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Autonomous, Bounds, Entity, Status};

/// Who fired the shot. Player shots hit enemies, enemy shots hit the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotOwner {
    #[default]
    Player,
    Enemy,
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: ShotOwner,
    pub status: Status,
}

impl Shot {
    pub fn new(pos: Vec2, vel: Vec2, owner: ShotOwner) -> Self {
        Self {
            pos,
            vel,
            owner,
            status: Status::Active,
        }
    }

    /// Consume the shot (hit something)
    pub fn deactivate(&mut self) {
        self.status = Status::Inactive;
    }
}

impl Entity for Shot {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl Autonomous for Shot {
    fn advance(&mut self, bounds: &Bounds) {
        if !self.is_active() {
            return;
        }
        self.pos += self.vel;
        if !bounds.contains(self.pos) {
            self.status = Status::Inactive;
        }
    }
}
