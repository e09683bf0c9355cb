//! Mimas - a fixed-timestep arcade shooter for a low-resolution LED matrix
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, spawning)
//! - `renderer`: Display contract and an in-memory LED matrix
//! - `audio`: Buzzer contract and tone/melody playback
//! - `settings`: Level, difficulty and balance configuration
//! - `game`: Harness that wires a session to its display and buzzer

pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{DifficultyPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz matches the panel refresh)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// LED matrix dimensions in pixels
    pub const DISPLAY_WIDTH: u32 = 32;
    pub const DISPLAY_HEIGHT: u32 = 16;
    /// Most enemies kept on screen at once (one per pixel)
    pub const MAX_ENEMIES: u32 = DISPLAY_WIDTH * DISPLAY_HEIGHT;

    /// Player spawn point
    pub const PLAYER_SPAWN_X: i32 = 4;
    pub const PLAYER_SPAWN_Y: i32 = 14;
    /// Full shield
    pub const MAX_SHIELD: u32 = 100;

    /// Enemy descent per tick
    pub const ENEMY_SPEED: f32 = 0.5;
    /// Power-up descent per tick
    pub const POWER_UP_SPEED: f32 = 0.2;
    /// Player shot speed (pixels per tick, upward)
    pub const SHOT_SPEED: f32 = 1.0;

    /// Score awarded per enemy destroyed by a shot
    pub const KILL_REWARD: u64 = 100;
    /// Score awarded by a ScoreBonus power-up
    pub const SCORE_BONUS: u64 = 50;
    /// Shield restored by a ShieldRecharge power-up
    pub const SHIELD_RECHARGE: u32 = 25;

    /// Half-extent of an entity's box; two entities overlap when both axis
    /// distances are strictly below twice this
    pub const HIT_HALF_EXTENT: f32 = 0.5;
}
