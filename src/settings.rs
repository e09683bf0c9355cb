//! Game settings and balance
//!
//! Stored as JSON next to the binary. Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_ENEMIES;

/// Errors loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "medium" | "med" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Difficulty multiplier for the enemy target count
    pub fn value(&self) -> u32 {
        match self {
            DifficultyPreset::Easy => 1,
            DifficultyPreset::Normal => 2,
            DifficultyPreset::Hard => 3,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Starting level (>= 1)
    pub level: u32,
    /// Difficulty multiplier (>= 1)
    pub difficulty: u32,
    /// RNG seed; a fresh one is drawn per session when absent
    pub seed: Option<u64>,

    // === Balance ===
    /// Shield lost when an enemy rams the ship
    pub ram_damage: u32,
    /// Shield lost per enemy shot
    pub enemy_shot_damage: u32,
    /// Chance per active enemy per tick to fire (0.0 - 1.0)
    pub enemy_fire_chance: f64,
    /// Chance a destroyed enemy drops a power-up (0.0 - 1.0)
    pub power_up_drop_chance: f64,
    /// Ticks between player shots
    pub fire_cooldown_ticks: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: 1,
            difficulty: 1,
            seed: None,

            ram_damage: 10,
            enemy_shot_damage: 10,
            enemy_fire_chance: 0.0,
            power_up_drop_chance: 0.0,
            fire_cooldown_ticks: 3,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut settings = Self::default();
        settings.difficulty = preset.value();
        settings
    }

    /// Set the starting level (clamped to 1..=MAX_ENEMIES)
    pub fn select_level(&mut self, level: u32) {
        self.level = level.clamp(1, MAX_ENEMIES);
    }

    /// Set the difficulty multiplier (clamped to 1..=MAX_ENEMIES)
    pub fn select_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty.clamp(1, MAX_ENEMIES);
    }

    /// Enemies kept on screen: level * difficulty, at most MAX_ENEMIES
    pub fn enemy_target(&self) -> usize {
        self.level
            .max(1)
            .saturating_mul(self.difficulty.max(1))
            .min(MAX_ENEMIES) as usize
    }

    /// Clamp probabilities and volume into range
    pub fn sanitized(mut self) -> Self {
        self.level = self.level.clamp(1, MAX_ENEMIES);
        self.difficulty = self.difficulty.clamp(1, MAX_ENEMIES);
        self.enemy_fire_chance = self.enemy_fire_chance.clamp(0.0, 1.0);
        self.power_up_drop_chance = self.power_up_drop_chance.clamp(0.0, 1.0);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
