//! In-memory LED matrix
//!
//! A framebuffer the size of the panel. The panel is acquired on `open`
//! and blanked and released when the value is dropped.

use super::Display;

/// Contents of one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Off,
    Player,
    Enemy,
    Shot,
    PowerUp,
    Text(char),
}

impl Cell {
    /// Character used for the terminal preview
    pub fn glyph(&self) -> char {
        match self {
            Cell::Off => '.',
            Cell::Player => 'A',
            Cell::Enemy => 'V',
            Cell::Shot => '|',
            Cell::PowerUp => '+',
            Cell::Text(c) => *c,
        }
    }
}

/// Framebuffer-backed display
#[derive(Debug)]
pub struct MatrixDisplay {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    frames: u64,
}

impl MatrixDisplay {
    /// Acquire a panel of the given size
    pub fn open(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "panel must be at least 1x1");
        log::info!("Matrix panel {}x{} acquired", width, height);
        Self {
            width,
            height,
            cells: vec![Cell::Off; (width * height) as usize],
            frames: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at a pixel; off-panel reads as `Off`
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Off-panel writes are dropped
    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Render the framebuffer as text, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in self.cells.chunks(self.width as usize) {
            out.extend(row.iter().map(Cell::glyph));
            out.push('\n');
        }
        out
    }
}

impl Display for MatrixDisplay {
    fn clear(&mut self) {
        self.cells.fill(Cell::Off);
    }

    fn draw_player(&mut self, x: i32, y: i32) {
        self.set(x, y, Cell::Player);
    }

    fn draw_enemy(&mut self, x: i32, y: i32) {
        self.set(x, y, Cell::Enemy);
    }

    fn draw_shot(&mut self, x: i32, y: i32) {
        self.set(x, y, Cell::Shot);
    }

    fn draw_power_up(&mut self, x: i32, y: i32) {
        self.set(x, y, Cell::PowerUp);
    }

    /// One cell per character, clipped at the panel edge
    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set(x + i as i32, y, Cell::Text(c));
        }
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

impl Drop for MatrixDisplay {
    fn drop(&mut self) {
        self.clear();
        log::info!("Matrix panel released after {} frames", self.frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_and_clip() {
        let mut panel = MatrixDisplay::open(4, 2);
        panel.draw_enemy(1, 0);
        panel.draw_player(3, 1);
        panel.draw_shot(-1, 0);
        panel.draw_power_up(4, 1);
        assert_eq!(panel.cell(1, 0), Cell::Enemy);
        assert_eq!(panel.cell(3, 1), Cell::Player);
        assert_eq!(panel.to_ascii(), ".V..\n...A\n");
    }

    #[test]
    fn test_text_is_clipped() {
        let mut panel = MatrixDisplay::open(5, 1);
        panel.draw_text(2, 0, "Hello");
        assert_eq!(panel.to_ascii(), "..Hel\n");
        panel.clear();
        assert_eq!(panel.to_ascii(), ".....\n");
    }

    #[test]
    fn test_present_counts_frames() {
        let mut panel = MatrixDisplay::open(2, 2);
        panel.present();
        panel.present();
        assert_eq!(panel.frames(), 2);
    }
}
