//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. No rendering or file access.

use std::f32::consts::SQRT_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::settings::Settings;

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every brick destroyed
    Victory,
    /// Last life lost
    Defeat,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing started yet
    Menu,
    /// Ticking
    Running,
    /// Frozen mid-game, resumes exactly where it stopped
    Paused,
    /// Terminal; no further ticks
    Ended(Outcome),
}

impl SessionPhase {
    /// A game that a quit should save
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionPhase::Running | SessionPhase::Paused)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, SessionPhase::Ended(_))
    }
}

/// The player's paddle. Moves horizontally only.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Centre x
    pub x: f32,
    /// Centre y (fixed for the session)
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
    /// Signed horizontal velocity (per tick)
    pub vel: f32,
    pub max_speed: f32,
    /// Right edge of the field the paddle is clamped to
    pub field_width: f32,
}

impl Paddle {
    /// Paddle centred horizontally at its fixed height
    pub fn new(settings: &Settings) -> Self {
        Self {
            x: settings.field_width / 2.0,
            y: settings.paddle_y(),
            half_width: settings.paddle_width / 2.0,
            half_height: settings.paddle_height / 2.0,
            vel: 0.0,
            max_speed: settings.paddle_max_speed,
            field_width: settings.field_width,
        }
    }

    pub fn set_velocity(&mut self, vel: f32) {
        self.vel = vel;
    }

    /// Apply velocity, then clamp into the field (no bounce)
    pub fn advance(&mut self) {
        self.x = self.clamped(self.x + self.vel);
    }

    /// Clamp a candidate x so the paddle stays fully inside the field
    pub fn clamped(&self, x: f32) -> f32 {
        x.max(self.half_width).min(self.field_width - self.half_width)
    }

    pub fn left(&self) -> f32 {
        self.x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.x + self.half_width
    }

    pub fn top(&self) -> f32 {
        self.y - self.half_height
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.half_height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Launch speed magnitude
    pub speed: f32,
}

impl Ball {
    /// Ball resting on the given paddle, ready to launch
    pub fn new(settings: &Settings, paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: settings.ball_radius,
            speed: settings.ball_speed,
        };
        ball.reset_on_paddle(paddle);
        ball
    }

    /// Move by one tick of velocity. Bounds are the collision resolver's job.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Sit on top of the paddle centre and launch up and to the right at 45°
    pub fn reset_on_paddle(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.x, paddle.top() - self.radius);
        let component = self.speed / SQRT_2;
        self.vel = Vec2::new(component, -component);
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Circumscribing square used for overlap tests
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }
}

/// A single brick (top-left anchored)
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    /// Points awarded on destruction
    pub value: u32,
}

impl Brick {
    pub fn new(x: f32, y: f32, width: f32, height: f32, value: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            alive: true,
            value,
        }
    }

    /// Destroy the brick. Returns false if it was already gone.
    pub fn destroy(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        was_alive
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// The brick grid, stored row-major in creation order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrickGrid {
    pub bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Uniform rows × cols grid starting below the HUD strip
    pub fn new(settings: &Settings) -> Self {
        let width = settings.brick_width();
        let mut bricks = Vec::with_capacity(settings.brick_count());
        for row in 0..settings.brick_rows {
            for col in 0..settings.brick_cols {
                bricks.push(Brick::new(
                    col as f32 * width,
                    row as f32 * settings.brick_height + settings.brick_top_offset,
                    width,
                    settings.brick_height,
                    settings.brick_value,
                ));
            }
        }
        Self { bricks }
    }

    pub fn from_bricks(bricks: Vec<Brick>) -> Self {
        Self { bricks }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Bricks still standing
    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Aliveness in creation order
    pub fn alive_flags(&self) -> Vec<bool> {
        self.bricks.iter().map(|b| b.alive).collect()
    }

    /// Overwrite aliveness from a saved grid. Lengths must already match.
    pub(crate) fn restore_flags(&mut self, flags: &[bool]) {
        for (brick, &alive) in self.bricks.iter_mut().zip(flags) {
            brick.alive = alive;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub phase: SessionPhase,
    pub score: u32,
    pub lives: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Ticks simulated since the session started or was restored
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh objects, sitting in the menu
    pub fn new(settings: Settings) -> Self {
        let paddle = Paddle::new(&settings);
        let ball = Ball::new(&settings, &paddle);
        let bricks = BrickGrid::new(&settings);
        Self {
            phase: SessionPhase::Menu,
            score: 0,
            lives: settings.starting_lives,
            paddle,
            ball,
            bricks,
            time_ticks: 0,
            settings,
        }
    }

    /// Rebuild everything for a brand-new session and start running
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
        self.phase = SessionPhase::Running;
    }

    /// Running ⇄ Paused. Returns the new phase; other phases are left alone.
    pub fn toggle_pause(&mut self) -> SessionPhase {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            other => other,
        };
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::new(Settings::default());
        assert_eq!(state.phase, SessionPhase::Menu);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.len(), 60);
        assert_eq!(state.bricks.alive_count(), 60);
        assert_eq!(state.paddle.x, 400.0);
    }

    #[test]
    fn test_grid_layout() {
        let grid = BrickGrid::new(&Settings::default());
        let first = &grid.bricks[0];
        assert_eq!((first.x, first.y, first.width, first.height), (0.0, 60.0, 80.0, 22.0));
        // Row-major: index 10 starts the second row
        let second_row = &grid.bricks[10];
        assert_eq!((second_row.x, second_row.y), (0.0, 82.0));
        let last = &grid.bricks[59];
        assert_eq!((last.x, last.y), (720.0, 170.0));
    }

    #[test]
    fn test_ball_rests_on_paddle() {
        let settings = Settings::default();
        let paddle = Paddle::new(&settings);
        let ball = Ball::new(&settings, &paddle);
        assert_eq!(ball.pos, Vec2::new(400.0, 547.0));
        assert!(ball.vel.x > 0.0 && ball.vel.y < 0.0);
        assert!((ball.vel.length() - settings.ball_speed).abs() < 1e-5);
        assert_eq!(ball.vel.x, -ball.vel.y);
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let mut paddle = Paddle::new(&Settings::default());
        paddle.set_velocity(-10_000.0);
        paddle.advance();
        assert_eq!(paddle.x, 60.0);

        paddle.set_velocity(10_000.0);
        paddle.advance();
        assert_eq!(paddle.x, 740.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_field(
            start in 60.0f32..=740.0,
            velocities in prop::collection::vec(
                prop_oneof![-20.0f32..20.0, -1.0e30f32..1.0e30],
                1..50,
            ),
        ) {
            let mut paddle = Paddle::new(&Settings::default());
            paddle.x = start;
            for vel in velocities {
                paddle.set_velocity(vel);
                paddle.advance();
                prop_assert!(paddle.x >= paddle.half_width);
                prop_assert!(paddle.x <= paddle.field_width - paddle.half_width);
            }
        }
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut brick = Brick::new(0.0, 0.0, 10.0, 10.0, 1);
        assert!(brick.destroy());
        assert!(!brick.destroy());
        assert!(!brick.alive);
    }

    #[test]
    fn test_toggle_pause_only_from_running() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(state.toggle_pause(), SessionPhase::Menu);

        state.reset();
        assert_eq!(state.toggle_pause(), SessionPhase::Paused);
        assert_eq!(state.toggle_pause(), SessionPhase::Running);

        state.phase = SessionPhase::Ended(Outcome::Victory);
        assert_eq!(state.toggle_pause(), SessionPhase::Ended(Outcome::Victory));
    }

    #[test]
    fn test_reset_rebuilds_grid() {
        let mut state = GameState::new(Settings::default());
        state.reset();
        state.bricks.bricks[3].destroy();
        state.score = 7;
        state.lives = 1;

        state.reset();
        assert_eq!(state.bricks.alive_count(), 60);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, SessionPhase::Running);
    }
}
