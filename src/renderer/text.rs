//! Terminal renderer
//!
//! Scales the field down onto a character grid. Good enough to watch a
//! headless run or to debug collisions by eye.

use std::io::Write;

use super::{FrameView, Renderer};
use crate::sim::Rect;

const BRICK: char = '#';
const PADDLE: char = '=';
const BALL: char = 'o';
const EMPTY: char = ' ';

pub struct TextRenderer<W: Write> {
    cols: usize,
    rows: usize,
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a frame to a string: HUD line, then the bordered field
    pub fn draw(&self, frame: &FrameView) -> String {
        let sx = self.cols as f32 / frame.field_width;
        let sy = self.rows as f32 / frame.field_height;
        let mut grid = vec![vec![EMPTY; self.cols]; self.rows];

        for brick in &frame.bricks {
            self.fill(&mut grid, brick, sx, sy, BRICK);
        }
        self.fill(&mut grid, &frame.paddle, sx, sy, PADDLE);

        let col = (frame.ball.x * sx).floor();
        let row = (frame.ball.y * sy).floor();
        if (0.0..self.cols as f32).contains(&col) && (0.0..self.rows as f32).contains(&row) {
            grid[row as usize][col as usize] = BALL;
        }

        let border = format!("+{}+", "-".repeat(self.cols));
        let mut text = String::with_capacity((self.cols + 3) * (self.rows + 3));
        text.push_str(&frame.status_line());
        text.push('\n');
        text.push_str(&border);
        text.push('\n');
        for line in grid {
            text.push('|');
            text.extend(line);
            text.push_str("|\n");
        }
        text.push_str(&border);
        text.push('\n');
        text
    }

    fn fill(&self, grid: &mut [Vec<char>], rect: &Rect, sx: f32, sy: f32, glyph: char) {
        let (c0, c1) = span(rect.left * sx, rect.right * sx, self.cols);
        let (r0, r1) = span(rect.top * sy, rect.bottom * sy, self.rows);
        for row in &mut grid[r0..r1] {
            for cell in &mut row[c0..c1] {
                *cell = glyph;
            }
        }
    }
}

/// Cells covered by [start, end), at least one cell wide, clamped to `len`
fn span(start: f32, end: f32, len: usize) -> (usize, usize) {
    let first = (start.floor().max(0.0) as usize).min(len);
    let last = (end.ceil().max(0.0) as usize).min(len).max(first + 1).min(len);
    (first, last)
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &FrameView) {
        let text = self.draw(frame);
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log::warn!("Render error: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameState;

    fn ball_cells(text: &str) -> usize {
        text.lines().skip(1).map(|line| line.matches(BALL).count()).sum()
    }

    #[test]
    fn test_draws_initial_field() {
        let mut state = GameState::new(Settings::default());
        state.reset();
        let renderer = TextRenderer::new(Vec::new(), 40, 30);
        let text = renderer.draw(&FrameView::from_state(&state));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Score: 0  Lives: ♥♥♥");
        assert_eq!(lines[1], format!("+{}+", "-".repeat(40)));
        assert_eq!(lines.len(), 1 + 1 + 30 + 1);
        // Grid rows 60..192 px map to text rows 3..10: solid bricks
        assert_eq!(lines[2 + 3], format!("|{}|", "#".repeat(40)));
        assert!(text.contains(PADDLE));
        assert_eq!(ball_cells(&text), 1);
    }

    #[test]
    fn test_lost_ball_not_drawn() {
        let mut state = GameState::new(Settings::default());
        state.ball.pos.y = 900.0;
        let renderer = TextRenderer::new(Vec::new(), 40, 30);
        let text = renderer.draw(&FrameView::from_state(&state));
        assert_eq!(ball_cells(&text), 0);
    }

    #[test]
    fn test_render_writes_to_output() {
        let state = GameState::new(Settings::default());
        let mut renderer = TextRenderer::new(Vec::new(), 20, 10);
        renderer.render(&FrameView::from_state(&state));
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with("Score: 0"));
    }
}
