//! Fixed timestep simulation tick
//!
//! One tick runs the pipeline in strict order: advance every entity,
//! resolve collisions, update the high score, check for game over, then
//! replenish enemies.

use rand::Rng;

use super::collision;
use super::entity::{Autonomous, Entity};
use super::player::MoveIntent;
use super::powerup::{PowerUp, PowerUpKind};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{KILL_REWARD, SCORE_BONUS, SHIELD_RECHARGE};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement requested by the input collaborator
    pub intent: MoveIntent,
    /// Fire button held
    pub fire: bool,
    /// Idle/demo mode - the ship steers itself
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Setup waits for start(), GameOver waits for reset()
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    advance(state, &input);
    resolve_collisions(state);
    state.update_high_score();
    check_game_over(state);

    if state.phase == GamePhase::Running {
        state.spawn_enemies();
    }
}

/// Step 1: move everything. No entity's move depends on another's.
fn advance(state: &mut GameState, input: &TickInput) {
    let bounds = state.bounds;

    state.player.move_by(input.intent, &bounds);
    let player_shot = if input.fire {
        state.player.fire(state.settings.fire_cooldown_ticks)
    } else {
        None
    };

    let mut escaped = 0;
    for enemy in &mut state.enemies {
        let was_active = enemy.is_active();
        enemy.advance(&bounds);
        if was_active && !enemy.is_active() {
            escaped += 1;
        }
    }
    for _ in 0..escaped {
        state.events.push(GameEvent::EnemyEscaped);
    }

    for shot in &mut state.shots {
        shot.advance(&bounds);
    }
    for power_up in &mut state.power_ups {
        power_up.advance(&bounds);
    }

    // New shots appear at their muzzle and start moving next tick
    if let Some(shot) = player_shot {
        state.spawn_shot(shot);
        state.events.push(GameEvent::ShotFired);
    }

    let chance = state.settings.enemy_fire_chance;
    if chance > 0.0 {
        let mut enemy_shots = Vec::new();
        for enemy in &state.enemies {
            if enemy.is_active() && state.rng.random_bool(chance) {
                enemy_shots.extend(enemy.fire());
            }
        }
        for shot in enemy_shots {
            state.spawn_shot(shot);
        }
    }
}

/// Step 2: collision passes, in order:
/// shots vs enemies, power-ups vs player, enemy shots vs player,
/// enemies vs player (first match ends the pass).
fn resolve_collisions(state: &mut GameState) {
    let kills = collision::shots_vs_enemies(&mut state.shots, &mut state.enemies);
    for kill in kills {
        let kind = state.enemies[kill.enemy_index].kind;
        state.add_score(KILL_REWARD);
        state.events.push(GameEvent::EnemyDestroyed {
            pos: kill.pos,
            kind,
        });
        log::debug!("Enemy {:?} destroyed at ({}, {})", kind, kill.pos.x, kill.pos.y);

        let drop_chance = state.settings.power_up_drop_chance;
        if drop_chance > 0.0 && state.rng.random_bool(drop_chance) {
            let kind = PowerUpKind::random(&mut state.rng);
            state.spawn_power_up(PowerUp::new(kill.pos, kind));
        }
    }

    for kind in collision::power_ups_vs_player(&mut state.power_ups, &state.player) {
        match kind {
            PowerUpKind::ShieldRecharge => state.player.recharge(SHIELD_RECHARGE),
            PowerUpKind::ScoreBonus => state.add_score(SCORE_BONUS),
        }
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {:?}", kind);
    }

    let shot_hits = collision::enemy_shots_vs_player(&mut state.shots, &state.player);
    for _ in 0..shot_hits {
        let damage = state.settings.enemy_shot_damage;
        state.player.take_damage(damage);
        state.events.push(GameEvent::PlayerHit { damage });
    }

    if let Some(index) = collision::enemy_vs_player(&state.enemies, &state.player) {
        // The rammer is destroyed too, without a reward
        state.enemies[index].explode();
        let damage = state.settings.ram_damage;
        state.player.take_damage(damage);
        state.events.push(GameEvent::PlayerHit { damage });
        log::debug!(
            "Player rammed for {}, shield now {}",
            damage,
            state.player.shield_energy()
        );
    }
}

/// Step 4: an empty shield ends the session
fn check_game_over(state: &mut GameState) {
    if state.player.shield_energy() == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} ticks: score {}, high score {}",
            state.time_ticks,
            state.score,
            state.high_score
        );
    }
}

/// Demo input: chase the lowest enemy's column and fire when lined up
fn autopilot(state: &GameState) -> TickInput {
    let ship = state.player.pos;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.is_active())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match target {
        Some(enemy) => {
            let column = enemy.pixel().x;
            let dx = (column - ship.x).signum();
            // Sidestep an enemy that is about to land on the ship
            let danger = dx == 0 && enemy.pos.y >= ship.y as f32 - 2.0;
            let dx = if danger {
                if ship.x > 0 { -1 } else { 1 }
            } else {
                dx
            };
            TickInput {
                intent: MoveIntent::new(dx, 0),
                fire: column == ship.x,
                idle_mode: false,
            }
        }
        None => TickInput::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::entity::Status;
    use crate::sim::shot::{Shot, ShotOwner};
    use glam::{IVec2, Vec2};

    fn running(level: u32, difficulty: u32) -> GameState {
        let settings = Settings {
            level,
            difficulty,
            seed: Some(12345),
            ..Default::default()
        };
        let mut state = GameState::new(settings);
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_setup_does_not_tick() {
        let mut state = GameState::new(Settings {
            seed: Some(1),
            ..Default::default()
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::Setup);
    }

    #[test]
    fn test_shot_kills_enemy_in_pipeline() {
        let mut state = running(1, 1);
        state.enemies.clear();
        // After advancing: shot (10,5), enemy (10,5.5)
        state.spawn_shot(Shot::new(
            Vec2::new(10.0, 6.0),
            Vec2::new(0.0, -1.0),
            ShotOwner::Player,
        ));
        state.enemies.push(Enemy::new(EnemyKind::Drone, Vec2::new(10.0, 5.0)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 100);
        assert_eq!(state.high_score, 100);
        assert_eq!(state.shots[0].status, Status::Inactive);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed {
                kind: EnemyKind::Drone,
                ..
            }
        )));
        // Replenished back to target in the same slot
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.active_enemies(), 1);
    }

    #[test]
    fn test_single_shot_single_kill_in_pipeline() {
        let mut state = running(1, 1);
        state.enemies.clear();
        state.spawn_shot(Shot::new(
            Vec2::new(10.0, 6.0),
            Vec2::new(0.0, -1.0),
            ShotOwner::Player,
        ));
        state.enemies.push(Enemy::new(EnemyKind::Drone, Vec2::new(10.0, 5.0)));
        state.enemies.push(Enemy::new(EnemyKind::Brute, Vec2::new(10.0, 5.0)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 100);
        assert!(state.enemies[1].is_active());
        assert_eq!(state.enemies[1].kind, EnemyKind::Brute);
    }

    #[test]
    fn test_ram_ends_session_same_tick() {
        let mut state = running(1, 1);
        state.enemies.clear();
        state.player.take_damage(90);
        assert_eq!(state.player.shield_energy(), 10);
        state.player.pos = IVec2::new(4, 14);
        state.enemies.push(Enemy::new(EnemyKind::Raider, Vec2::new(4.0, 13.5)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.shield_energy(), 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemies[0].was_destroyed());
        assert_eq!(state.score, 0);
        // No replenishment once terminal
        assert_eq!(state.active_enemies(), 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayerHit { damage: 10 }));
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        // Terminal: further ticks do nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_ram_damage_is_configurable() {
        let mut state = running(1, 1);
        state.settings.ram_damage = 35;
        state.enemies.clear();
        state.enemies.push(Enemy::new(EnemyKind::Drone, Vec2::new(4.0, 13.5)));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.shield_energy(), 65);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_fire_spawns_shot_at_ship() {
        let mut state = running(1, 1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let shot = state
            .shots
            .iter()
            .find(|s| s.is_active())
            .expect("shot fired");
        assert_eq!(shot.pos, Vec2::new(4.0, 14.0));
        assert!(state.events.contains(&GameEvent::ShotFired));

        // Next tick it has moved up one row
        tick(&mut state, &TickInput::default());
        assert_eq!(state.shots[0].pos, Vec2::new(4.0, 13.0));
    }

    #[test]
    fn test_move_intent_clamped_in_tick() {
        let mut state = running(1, 1);
        let input = TickInput {
            intent: MoveIntent::new(-50, 50),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, IVec2::new(0, 15));
    }

    #[test]
    fn test_escape_is_silent() {
        let mut state = running(1, 1);
        state.enemies.clear();
        state.enemies.push(Enemy::new(EnemyKind::Drone, Vec2::new(30.0, 15.0)));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert!(state.events.contains(&GameEvent::EnemyEscaped));
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
        );
    }

    #[test]
    fn test_enemy_fire_hits_player() {
        let mut state = running(1, 1);
        state.settings.enemy_fire_chance = 1.0;
        state.enemies.clear();
        // Enemy directly above the ship, out of ramming range
        state.enemies.push(Enemy::new(EnemyKind::Drone, Vec2::new(4.0, 8.0)));

        // Shot spawns at (4, 8.5) and falls one row per tick
        for _ in 0..8 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.shield_energy() < 100);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerHit { damage: 10 }))
        );
    }

    #[test]
    fn test_power_up_drop_and_pickup() {
        let mut state = running(1, 1);
        state.settings.power_up_drop_chance = 1.0;
        state.enemies.clear();
        state.player.take_damage(50);
        // Kill an enemy right above the ship so the drop lands on it
        state.spawn_shot(Shot::new(
            Vec2::new(4.0, 11.0),
            Vec2::new(0.0, -1.0),
            ShotOwner::Player,
        ));
        state.enemies.push(Enemy::new(EnemyKind::Drone, Vec2::new(4.0, 9.5)));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 100);
        assert_eq!(state.power_ups.len(), 1);

        // Drifts at 0.2/tick from y=10 to the ship at y=14
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
            if !state.power_ups[0].is_active() {
                break;
            }
        }
        assert!(!state.power_ups[0].is_active());
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PowerUpCollected { .. }))
        );
        assert!(state.score == 150 || state.player.shield_energy() == 75);
    }

    #[test]
    fn test_idle_mode_plays() {
        let mut state = running(1, 2);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input);
            if state.is_game_over() {
                break;
            }
        }
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(2, 2);
        let mut b = running(2, 2);
        let inputs = [
            TickInput {
                intent: MoveIntent::RIGHT,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (x, y) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(x.pos, y.pos);
        }
    }
}
