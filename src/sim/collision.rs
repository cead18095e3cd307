//! Collision detection and response for axis-aligned geometry
//!
//! The ball is approximated by its circumscribing square for every overlap
//! test. All checks are discrete: one position per tick, no sweeping, so a
//! fast enough ball can tunnel through thin obstacles.

use super::state::{Ball, BrickGrid, Paddle};

/// Axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Overlap test with touching edges counting as contact
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.bottom >= other.top
            && self.top <= other.bottom
    }
}

/// Velocity component a collision negates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Side contact, negate vx
    Horizontal,
    /// Top/bottom contact, negate vy
    Vertical,
}

/// A brick destroyed this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    /// Index in grid creation order
    pub index: usize,
    /// Points to award
    pub value: u32,
}

/// Pick the reflection axis from the four penetration depths.
///
/// The smallest overlap names the side that was struck. A tie between a side
/// and a top/bottom depth resolves horizontally.
pub fn reflection_axis(ball: &Rect, brick: &Rect) -> Axis {
    let from_left = ball.right - brick.left;
    let from_right = brick.right - ball.left;
    let from_top = ball.bottom - brick.top;
    let from_bottom = brick.bottom - ball.top;

    let min = from_left.min(from_right).min(from_top).min(from_bottom);
    if min == from_left || min == from_right {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

fn reflect(ball: &mut Ball, axis: Axis) {
    match axis {
        Axis::Horizontal => ball.vel.x = -ball.vel.x,
        Axis::Vertical => ball.vel.y = -ball.vel.y,
    }
}

/// Bounce off the left, right and top walls. The bottom is open.
pub fn resolve_walls(ball: &mut Ball, field_width: f32) {
    if ball.left() <= 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = -ball.vel.x;
    } else if ball.right() >= field_width {
        ball.pos.x = field_width - ball.radius;
        ball.vel.x = -ball.vel.x;
    }

    if ball.top() <= 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
    }
}

/// Destroy the first alive brick (in grid order) the ball overlaps.
///
/// First match wins, not the nearest brick, and at most one brick is
/// resolved per call even when several overlap.
pub fn resolve_bricks(ball: &mut Ball, grid: &mut BrickGrid) -> Option<BrickHit> {
    let bounds = ball.bounds();
    let (index, brick) = grid
        .bricks
        .iter_mut()
        .enumerate()
        .find(|(_, brick)| brick.alive && bounds.overlaps(&brick.rect()))?;

    reflect(ball, reflection_axis(&bounds, &brick.rect()));
    brick.destroy();

    Some(BrickHit {
        index,
        value: brick.value,
    })
}

/// Bounce a descending ball off the paddle top.
///
/// Contact point has no effect on the outgoing angle.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    let over_paddle = (paddle.left()..=paddle.right()).contains(&ball.pos.x);
    let bottom_in_paddle = (paddle.top()..=paddle.bottom()).contains(&ball.bottom());

    if over_paddle && bottom_in_paddle && ball.vel.y > 0.0 {
        ball.pos.y = paddle.top() - ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// What the ball touched during one resolve pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub brick: Option<BrickHit>,
    pub paddle: bool,
}

/// Run walls, bricks and paddle in that order
pub fn resolve(
    ball: &mut Ball,
    paddle: &Paddle,
    grid: &mut BrickGrid,
    field_width: f32,
) -> Contacts {
    resolve_walls(ball, field_width);
    let brick = resolve_bricks(ball, grid);
    let paddle_hit = resolve_paddle(ball, paddle);
    Contacts {
        brick,
        paddle: paddle_hit,
    }
}
