//! Session state: the world that owns every entity
//!
//! The world exclusively owns the player, enemies, shots and power-ups.
//! Entities never reference the world; destruction is a status flip and
//! storage slots are reused by later spawns.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyKind};
use super::entity::{Bounds, count_active, spawn_into};
use super::player::PlayerShip;
use super::powerup::{PowerUp, PowerUpKind};
use super::shot::Shot;
use crate::settings::Settings;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Choosing level and difficulty
    Setup,
    /// Ticks advance the simulation
    Running,
    /// Ship destroyed; terminal until reset
    GameOver,
}

/// Something that happened during a tick, for audio and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    ShotFired,
    EnemyDestroyed { pos: Vec2, kind: EnemyKind },
    EnemyEscaped,
    PlayerHit { damage: u32 },
    PowerUpCollected { kind: PowerUpKind },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub bounds: Bounds,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Highest level selected in this process
    pub max_level_reached: u32,
    pub score: u64,
    pub high_score: u64,
    /// High score at the start of the current session
    record_to_beat: u64,
    record_announced: bool,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    pub player: PlayerShip,
    pub enemies: Vec<Enemy>,
    pub shots: Vec<Shot>,
    pub power_ups: Vec<PowerUp>,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the Setup phase on the default display
    pub fn new(settings: Settings) -> Self {
        Self::with_bounds(settings, Bounds::default())
    }

    pub fn with_bounds(settings: Settings, bounds: Bounds) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self {
            max_level_reached: settings.level,
            settings,
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Setup,
            score: 0,
            high_score: 0,
            record_to_beat: 0,
            record_announced: false,
            time_ticks: 0,
            player: PlayerShip::new(),
            enemies: Vec::new(),
            shots: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.settings.level
    }

    pub fn difficulty(&self) -> u32 {
        self.settings.difficulty
    }

    /// Change the level used for the enemy target
    pub fn select_level(&mut self, level: u32) {
        self.settings.select_level(level);
        self.max_level_reached = self.max_level_reached.max(self.settings.level);
        log::info!("Level set to {}", self.settings.level);
    }

    /// Change the difficulty used for the enemy target
    pub fn select_difficulty(&mut self, difficulty: u32) {
        self.settings.select_difficulty(difficulty);
        log::info!("Difficulty set to {}", self.settings.difficulty);
    }

    /// Enemies to keep on screen: level * difficulty
    pub fn enemy_target(&self) -> usize {
        self.settings.enemy_target()
    }

    pub fn active_enemies(&self) -> usize {
        count_active(&self.enemies)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Begin a session: Setup -> Running
    pub fn start(&mut self) {
        if self.phase != GamePhase::Setup {
            log::warn!("start() ignored in phase {:?}", self.phase);
            return;
        }
        self.player.initialize();
        self.clear_entities();
        self.score = 0;
        self.time_ticks = 0;
        self.record_to_beat = self.high_score;
        self.record_announced = false;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::SessionStarted);

        let spawned = self.spawn_enemies();
        log::info!(
            "Session started: level {}, difficulty {}, {} enemies, seed {}",
            self.level(),
            self.difficulty(),
            spawned,
            self.seed
        );
    }

    /// Back to Setup, keeping the high score and settings
    pub fn reset(&mut self) {
        self.clear_entities();
        self.player.initialize();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Setup;
    }

    fn clear_entities(&mut self) {
        self.enemies.clear();
        self.shots.clear();
        self.power_ups.clear();
    }

    /// Top the active enemy count up to the target. Returns how many spawned.
    pub fn spawn_enemies(&mut self) -> usize {
        let missing = self.enemy_target().saturating_sub(self.active_enemies());
        for _ in 0..missing {
            let kind = EnemyKind::random(&mut self.rng);
            let enemy = Enemy::spawn(kind, &self.bounds, &mut self.rng);
            spawn_into(&mut self.enemies, enemy);
        }
        if missing > 0 {
            log::debug!("Spawned {} enemies (target {})", missing, self.enemy_target());
        }
        missing
    }

    pub fn spawn_shot(&mut self, shot: Shot) -> usize {
        spawn_into(&mut self.shots, shot)
    }

    pub fn spawn_power_up(&mut self, power_up: PowerUp) -> usize {
        spawn_into(&mut self.power_ups, power_up)
    }

    /// Credit points to the current score
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// highScore = max(highScore, score)
    pub fn update_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        if self.record_to_beat > 0 && !self.record_announced && self.score > self.record_to_beat {
            self.record_announced = true;
            log::info!("New high score: {}", self.score);
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
