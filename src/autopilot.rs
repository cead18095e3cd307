//! Idle/demo mode - steers the paddle under the ball
//!
//! Uses only the directional commands a player has, so it goes through the
//! same input path as a keyboard.

use crate::platform::Direction;
use crate::sim::GameState;

/// What the autopilot wants the paddle to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Stop,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Fraction of the paddle half-width the ball may drift before it reacts
    dead_zone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { dead_zone: 0.25 }
    }
}

impl Autopilot {
    /// Track the ball's x, aiming slightly ahead of where it is heading
    pub fn decide(&self, state: &GameState) -> Command {
        let ball = &state.ball;
        let paddle = &state.paddle;
        let target = if ball.vel.y > 0.0 {
            ball.pos.x + ball.vel.x
        } else {
            ball.pos.x
        };
        let slack = paddle.half_width * self.dead_zone;
        if target < paddle.x - slack {
            Command::Move(Direction::Left)
        } else if target > paddle.x + slack {
            Command::Move(Direction::Right)
        } else {
            Command::Stop
        }
    }
}
