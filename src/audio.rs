//! Buzzer audio
//!
//! Single-voice square-wave tones, the only thing a piezo buzzer can do.
//! The simulation records events; the harness turns them into tones here.

use crate::sim::GameEvent;

/// Tone output. Fire-and-forget: the caller never waits for playback.
pub trait Buzzer {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32);
}

/// Logs tones instead of sounding them (for hosts without a buzzer)
#[derive(Debug, Default)]
pub struct LogBuzzer {
    pub tones_played: u64,
}

impl Buzzer for LogBuzzer {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.tones_played += 1;
        log::debug!("tone {} Hz for {} ms", frequency_hz, duration_ms);
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Session begins
    SessionStart,
    /// Player fires
    Shot,
    /// Enemy destroyed by a shot
    EnemyDestroyed,
    /// Ship loses shield
    PlayerHit,
    /// Power-up collected
    PickupCollect,
    /// Ship destroyed
    GameOver,
    /// Previous record beaten
    HighScore,
}

/// Note length used for melodies
pub const MELODY_NOTE_MS: u32 = 200;

/// Played when the session record is beaten
pub const HIGH_SCORE_MELODY: [u32; 5] = [440, 880, 660, 440, 550];

/// Audio manager for the game
pub struct AudioManager<B: Buzzer> {
    buzzer: B,
    master_volume: f32,
    muted: bool,
}

impl<B: Buzzer> AudioManager<B> {
    pub fn new(buzzer: B) -> Self {
        Self {
            buzzer,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0). A buzzer has no amplitude control,
    /// so any volume above zero plays at full strength.
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn audible(&self) -> bool {
        !self.muted && self.master_volume > 0.0
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    /// Play a single tone
    pub fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        if self.audible() {
            self.buzzer.play_tone(frequency_hz, duration_ms);
        }
    }

    /// Play a sequence of notes, each `note_ms` long
    pub fn play_melody(&mut self, notes: &[u32], note_ms: u32) {
        for &freq in notes {
            self.play_tone(freq, note_ms);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::SessionStart => self.play_tone(1024, 200),
            SoundEffect::Shot => self.play_tone(2000, 10),
            SoundEffect::EnemyDestroyed => self.play_tone(880, 40),
            SoundEffect::PlayerHit => self.play_tone(150, 80),
            SoundEffect::PickupCollect => self.play_melody(&[600, 800, 1000], 30),
            SoundEffect::GameOver => self.play_tone(200, 500),
            SoundEffect::HighScore => self.play_melody(&HIGH_SCORE_MELODY, MELODY_NOTE_MS),
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::SessionStarted => Some(SoundEffect::SessionStart),
            GameEvent::ShotFired => Some(SoundEffect::Shot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyDestroyed),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PickupCollect),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::EnemyEscaped => None,
        }
    }

    /// Play the sound for each event in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(effect) = Self::effect_for(event) {
                self.play(effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        tones: Vec<(u32, u32)>,
    }

    impl Buzzer for Recorder {
        fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
            self.tones.push((frequency_hz, duration_ms));
        }
    }

    #[test]
    fn test_start_and_game_over_tones() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_events(&[GameEvent::SessionStarted, GameEvent::GameOver { score: 0 }]);
        assert_eq!(audio.buzzer().tones, vec![(1024, 200), (200, 500)]);
    }

    #[test]
    fn test_high_score_melody() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.play(SoundEffect::HighScore);
        let freqs: Vec<u32> = audio.buzzer().tones.iter().map(|t| t.0).collect();
        assert_eq!(freqs, HIGH_SCORE_MELODY.to_vec());
        assert!(audio.buzzer().tones.iter().all(|t| t.1 == MELODY_NOTE_MS));
    }

    #[test]
    fn test_muted_is_silent() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::SessionStart);
        audio.set_muted(false);
        audio.set_master_volume(0.0);
        audio.play(SoundEffect::GameOver);
        assert!(audio.buzzer().tones.is_empty());
    }

    #[test]
    fn test_escape_has_no_sound() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_events(&[GameEvent::EnemyEscaped]);
        assert!(audio.buzzer().tones.is_empty());
    }
}
