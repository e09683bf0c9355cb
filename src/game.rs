//! Game harness
//!
//! Owns a session together with its display and buzzer. Ticks run on a
//! fixed timestep; after each tick the frame is redrawn and the recorded
//! events are turned into sound.

use crate::audio::{AudioManager, Buzzer};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Display, render};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Longest frame delta fed to the accumulator (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// A session wired to its output devices
pub struct Game<D: Display, B: Buzzer> {
    state: GameState,
    display: D,
    audio: AudioManager<B>,
    accumulator: f32,
}

impl<D: Display, B: Buzzer> Game<D, B> {
    /// Create a game in the Setup phase and draw the setup screen
    pub fn new(settings: Settings, display: D, buzzer: B) -> Self {
        let mut audio = AudioManager::new(buzzer);
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);

        let mut game = Self {
            state: GameState::new(settings),
            display,
            audio,
            accumulator: 0.0,
        };
        game.redraw();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<B> {
        &mut self.audio
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Level selection; only honoured during Setup
    pub fn select_level(&mut self, level: u32) {
        if self.state.phase != GamePhase::Setup {
            log::warn!("Level can only be changed during setup");
            return;
        }
        self.state.select_level(level);
        self.redraw();
    }

    /// Difficulty selection; only honoured during Setup
    pub fn select_difficulty(&mut self, difficulty: u32) {
        if self.state.phase != GamePhase::Setup {
            log::warn!("Difficulty can only be changed during setup");
            return;
        }
        self.state.select_difficulty(difficulty);
        self.redraw();
    }

    /// Setup -> Running
    pub fn start(&mut self) {
        self.state.start();
        self.accumulator = 0.0;
        self.redraw();
    }

    /// Back to Setup for a new session. The high score is kept.
    pub fn restart(&mut self) {
        self.state.reset();
        self.accumulator = 0.0;
        log::info!("Session reset (high score {})", self.state.high_score);
        self.redraw();
    }

    /// Run exactly one tick and present the result
    pub fn frame(&mut self, input: &TickInput) {
        tick(&mut self.state, input);
        self.redraw();
    }

    /// Feed wall-clock time into the fixed timestep. Returns ticks run.
    pub fn update(&mut self, dt: f32, input: &TickInput) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps > 0 {
            self.redraw();
        }
        substeps
    }

    fn redraw(&mut self) {
        render(&self.state, &mut self.display);
        let events = self.state.drain_events();
        self.audio.handle_events(&events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Cell, MatrixDisplay};
    use crate::sim::{Enemy, EnemyKind};
    use glam::Vec2;

    #[derive(Default)]
    struct Tones(Vec<(u32, u32)>);

    impl Buzzer for Tones {
        fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
            self.0.push((frequency_hz, duration_ms));
        }
    }

    fn game() -> Game<MatrixDisplay, Tones> {
        let settings = Settings {
            seed: Some(99),
            ..Default::default()
        };
        Game::new(settings, MatrixDisplay::open(32, 16), Tones::default())
    }

    #[test]
    fn test_setup_screen_and_selection() {
        let mut g = game();
        assert_eq!(g.phase(), GamePhase::Setup);
        assert_eq!(g.display().cell(1, 1), Cell::Text('S'));
        g.select_level(3);
        g.select_difficulty(2);
        assert_eq!(g.display().cell(2, 3), Cell::Text('3'));
        assert_eq!(g.display().cell(1, 5), Cell::Text('S'));
        assert_eq!(g.display().cell(2, 7), Cell::Text('2'));
        assert_eq!(g.state().enemy_target(), 6);
    }

    #[test]
    fn test_start_plays_start_tone() {
        let mut g = game();
        g.start();
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.audio().buzzer().0, vec![(1024, 200)]);
        assert_eq!(g.display().cell(4, 14), Cell::Player);

        // Selection is locked while running
        g.select_level(5);
        assert_eq!(g.state().level(), 1);
    }

    #[test]
    fn test_ram_ends_session_with_game_over_tone() {
        let mut g = game();
        g.start();
        g.state_mut().player.take_damage(90);
        g.state_mut()
            .enemies
            .push(Enemy::new(EnemyKind::Drone, Vec2::new(4.0, 13.5)));

        g.frame(&TickInput::default());
        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.audio().buzzer().0.last(), Some(&(200, 500)));
        assert_eq!(g.display().cell(5, 5), Cell::Text('G'));

        // Terminal until restart
        let ticks = g.state().time_ticks;
        g.frame(&TickInput::default());
        assert_eq!(g.state().time_ticks, ticks);

        g.restart();
        assert_eq!(g.phase(), GamePhase::Setup);
        assert_eq!(g.state().player.shield_energy(), 100);
    }

    #[test]
    fn test_update_runs_fixed_ticks() {
        let mut g = game();
        g.start();
        assert_eq!(g.update(0.05, &TickInput::default()), 1);
        assert_eq!(g.update(0.0, &TickInput::default()), 0);
        assert!(g.update(10.0, &TickInput::default()) <= MAX_SUBSTEPS);
        assert!(g.display().frames() >= 2);
    }

    #[test]
    fn test_muted_settings_silence_audio() {
        let settings = Settings {
            seed: Some(1),
            muted: true,
            ..Default::default()
        };
        let mut g = Game::new(settings, MatrixDisplay::open(32, 16), Tones::default());
        g.start();
        assert!(g.audio().buzzer().0.is_empty());
    }
}
