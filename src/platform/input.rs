//! Directional input
//!
//! Presses and releases only set the paddle's velocity; the next tick reads
//! it. Last writer wins, nothing is queued.

use crate::sim::Paddle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Key down: full speed in that direction
pub fn press(paddle: &mut Paddle, direction: Direction) {
    paddle.set_velocity(direction.sign() * paddle.max_speed);
}

/// Key up: stop, unless the paddle is already moving the other way
pub fn release(paddle: &mut Paddle, direction: Direction) {
    if paddle.vel * direction.sign() > 0.0 {
        paddle.set_velocity(0.0);
    }
}

pub fn stop(paddle: &mut Paddle) {
    paddle.set_velocity(0.0);
}
