//! Enemy entity: a hostile that drifts down the matrix

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Autonomous, Bounds, Entity, Status};
use super::shot::{Shot, ShotOwner};
use crate::consts::{ENEMY_SPEED, SHOT_SPEED};

/// Enemy types, numbered 0..=2 on the wire and in spawn tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Drone,
    Raider,
    Brute,
}

impl EnemyKind {
    /// Kind for a type index. Panics outside 0..=2: spawn logic never
    /// produces such values.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => EnemyKind::Drone,
            1 => EnemyKind::Raider,
            2 => EnemyKind::Brute,
            _ => panic!("enemy type {index} out of range 0..=2"),
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            EnemyKind::Drone => 0,
            EnemyKind::Raider => 1,
            EnemyKind::Brute => 2,
        }
    }

    /// Starting hit points: (type + 1) * 10
    pub fn hit_points(&self) -> u32 {
        (self.index() as u32 + 1) * 10
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from_index(rng.random_range(0..3))
    }
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub hit_points: u32,
    pub status: Status,
}

impl Enemy {
    /// Spawn at a given position
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            pos,
            kind,
            hit_points: kind.hit_points(),
            status: Status::Active,
        }
    }

    /// Spawn on the top row at a random column
    pub fn spawn(kind: EnemyKind, bounds: &Bounds, rng: &mut impl Rng) -> Self {
        let x = rng.random_range(0..bounds.width) as f32;
        Self::new(kind, Vec2::new(x, 0.0))
    }

    /// Destroyed by damage: inactive with no hit points left.
    /// Idempotent.
    pub fn explode(&mut self) {
        self.status = Status::Inactive;
        self.hit_points = 0;
    }

    /// Whether this enemy was removed by damage rather than by leaving the screen
    pub fn was_destroyed(&self) -> bool {
        self.status == Status::Inactive && self.hit_points == 0
    }

    /// Request a downward enemy-owned shot from the current position
    pub fn fire(&self) -> Option<Shot> {
        if !self.is_active() {
            return None;
        }
        Some(Shot::new(
            self.pos,
            Vec2::new(0.0, SHOT_SPEED),
            ShotOwner::Enemy,
        ))
    }
}

impl Entity for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl Autonomous for Enemy {
    fn advance(&mut self, bounds: &Bounds) {
        if !self.is_active() {
            return;
        }
        self.pos.y += ENEMY_SPEED;
        if bounds.below_bottom(self.pos.y) {
            // Silent removal: hit points are kept so no reward is credited
            self.status = Status::Inactive;
        }
    }
}
