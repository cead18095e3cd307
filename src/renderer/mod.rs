//! Rendering adapters
//!
//! The simulation never draws. A front end takes a [`FrameView`], which is
//! plain data copied out of the state, and draws it however it likes.

pub mod text;

pub use text::TextRenderer;

use crate::sim::{GameState, Outcome, Rect, SessionPhase};

/// Circle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle: Rect,
    pub ball: CircleView,
    /// Alive bricks only
    pub bricks: Vec<Rect>,
    pub score: u32,
    pub lives: u32,
    pub phase: SessionPhase,
}

impl FrameView {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            field_width: state.settings.field_width,
            field_height: state.settings.field_height,
            paddle: state.paddle.rect(),
            ball: CircleView {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                radius: state.ball.radius,
            },
            bricks: state
                .bricks
                .bricks
                .iter()
                .filter(|b| b.alive)
                .map(|b| b.rect())
                .collect(),
            score: state.score,
            lives: state.lives,
            phase: state.phase,
        }
    }

    /// HUD status text
    pub fn status_line(&self) -> String {
        let phase = match self.phase {
            SessionPhase::Menu => "MENU",
            SessionPhase::Running => "",
            SessionPhase::Paused => "PAUSED",
            SessionPhase::Ended(Outcome::Victory) => "VICTORY!",
            SessionPhase::Ended(Outcome::Defeat) => "GAME OVER",
        };
        let hearts = "♥".repeat(self.lives as usize);
        format!("Score: {}  Lives: {}  {}", self.score, hearts, phase)
            .trim_end()
            .to_string()
    }
}

/// A front end that draws frames
pub trait Renderer {
    fn render(&mut self, frame: &FrameView);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_frame_view_skips_dead_bricks() {
        let mut state = GameState::new(Settings::default());
        state.bricks.bricks[0].destroy();
        let frame = FrameView::from_state(&state);
        assert_eq!(frame.bricks.len(), 59);
        assert_eq!(frame.paddle, Rect::new(340.0, 552.0, 460.0, 568.0));
        assert_eq!(frame.ball.y, 547.0);
    }

    #[test]
    fn test_status_line() {
        let mut state = GameState::new(Settings::default());
        state.reset();
        state.score = 14;
        state.lives = 2;
        assert_eq!(FrameView::from_state(&state).status_line(), "Score: 14  Lives: ♥♥");

        state.phase = SessionPhase::Ended(Outcome::Defeat);
        state.lives = 0;
        assert_eq!(
            FrameView::from_state(&state).status_line(),
            "Score: 14  Lives:   GAME OVER"
        );
    }
}
