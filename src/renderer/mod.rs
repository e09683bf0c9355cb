//! Display contract and frame rendering
//!
//! The simulation never touches pixels. `render` walks a `GameState` and
//! issues fire-and-forget draw calls to whatever implements `Display`.

pub mod matrix;

pub use matrix::{Cell, MatrixDisplay};

use crate::sim::{Entity, GamePhase, GameState};

/// Drawing surface for the LED matrix.
///
/// Calls must not fail observably and must not alter game state.
pub trait Display {
    fn clear(&mut self);
    fn draw_player(&mut self, x: i32, y: i32);
    fn draw_enemy(&mut self, x: i32, y: i32);
    fn draw_shot(&mut self, x: i32, y: i32);
    fn draw_power_up(&mut self, x: i32, y: i32);
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    /// Push the finished frame to the panel
    fn present(&mut self) {}
}

/// Draw one frame of the session
pub fn render(state: &GameState, display: &mut impl Display) {
    display.clear();

    match state.phase {
        GamePhase::Setup => {
            display.draw_text(1, 1, "Select Level:");
            display.draw_text(1, 3, &format!("L{}", state.level()));
            display.draw_text(1, 5, "Select Difficulty:");
            display.draw_text(1, 7, &format!("D{}", state.difficulty()));
        }
        GamePhase::Running => {
            for power_up in state.power_ups.iter().filter(|p| p.is_active()) {
                let p = power_up.pixel();
                display.draw_power_up(p.x, p.y);
            }
            for shot in state.shots.iter().filter(|s| s.is_active()) {
                let p = shot.pixel();
                display.draw_shot(p.x, p.y);
            }
            for enemy in state.enemies.iter().filter(|e| e.is_active()) {
                let p = enemy.pixel();
                display.draw_enemy(p.x, p.y);
            }
            if state.player.is_active() {
                display.draw_player(state.player.pos.x, state.player.pos.y);
            }
            display.draw_text(0, 0, &format!("Score: {}", state.score));
        }
        GamePhase::GameOver => {
            display.draw_text(5, 5, "Game Over!");
        }
    }

    display.present();
}
