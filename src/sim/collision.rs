//! Collision detection between entities
//!
//! Every entity occupies a one-pixel box centred on its position. Two
//! entities overlap when both axis distances are strictly below one box
//! width. At the descent and shot speeds used here the relative motion per
//! tick is below two box widths, so a shot cannot skip over an enemy.
//!
//! The pass functions only mark entities inactive and report what happened;
//! scoring and damage are applied by the caller.

use glam::Vec2;

use super::enemy::Enemy;
use super::entity::Entity;
use super::player::PlayerShip;
use super::powerup::{PowerUp, PowerUpKind};
use super::shot::{Shot, ShotOwner};
use crate::consts::HIT_HALF_EXTENT;

/// Box overlap test. Inactive entities never overlap anything.
pub fn overlaps(a: &impl Entity, b: &impl Entity) -> bool {
    if !a.is_active() || !b.is_active() {
        return false;
    }
    let d = (a.position() - b.position()).abs();
    let reach = 2.0 * HIT_HALF_EXTENT;
    d.x < reach && d.y < reach
}

/// An enemy destroyed by a player shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub enemy_index: usize,
    pub shot_index: usize,
    pub pos: Vec2,
}

/// Player shots against enemies.
///
/// A shot is consumed by the first enemy it overlaps and cannot destroy a
/// second one in the same pass. Each destroyed enemy is reported once.
pub fn shots_vs_enemies(shots: &mut [Shot], enemies: &mut [Enemy]) -> Vec<Kill> {
    let mut kills = Vec::new();

    for (shot_index, shot) in shots.iter_mut().enumerate() {
        if !shot.is_active() || shot.owner != ShotOwner::Player {
            continue;
        }

        let hit = enemies.iter().position(|enemy| overlaps(&*shot, enemy));
        if let Some(enemy_index) = hit {
            let enemy = &mut enemies[enemy_index];
            let pos = enemy.pos;
            enemy.explode();
            shot.deactivate();
            kills.push(Kill {
                enemy_index,
                shot_index,
                pos,
            });
        }
    }

    kills
}

/// Enemy shots against the player. Returns how many shots landed.
pub fn enemy_shots_vs_player(shots: &mut [Shot], player: &PlayerShip) -> u32 {
    let mut hits = 0;
    for shot in shots.iter_mut() {
        if shot.owner == ShotOwner::Enemy && overlaps(&*shot, player) {
            shot.deactivate();
            hits += 1;
        }
    }
    hits
}

/// Power-ups touching the player are collected. Returns the kinds picked up.
pub fn power_ups_vs_player(power_ups: &mut [PowerUp], player: &PlayerShip) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    for power_up in power_ups.iter_mut() {
        if overlaps(&*power_up, player) {
            power_up.collect();
            collected.push(power_up.kind);
        }
    }
    collected
}

/// First active enemy touching the player, if any
pub fn enemy_vs_player(enemies: &[Enemy], player: &PlayerShip) -> Option<usize> {
    enemies.iter().position(|enemy| overlaps(enemy, player))
}
