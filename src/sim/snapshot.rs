//! Resumable session snapshot
//!
//! The physical and session state a storage collaborator must round-trip.
//! Field names match the on-disk JSON object.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, SessionPhase};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleSnapshot {
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub lives: u32,
    pub paddle: PaddleSnapshot,
    pub ball: BallSnapshot,
    /// Brick aliveness in grid creation order
    pub bricks: Vec<bool>,
}

/// Why a snapshot cannot be restored
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    BrickCountMismatch { expected: usize, actual: usize },
    NoLivesLeft,
    TooManyLives { lives: u32, max: u32 },
    NonFinite { field: &'static str },
    PaddleOutOfBounds { x: f32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrickCountMismatch { expected, actual } => {
                write!(f, "snapshot has {actual} bricks, grid has {expected}")
            }
            Self::NoLivesLeft => write!(f, "snapshot has no lives left"),
            Self::TooManyLives { lives, max } => {
                write!(f, "snapshot has {lives} lives, a session starts with {max}")
            }
            Self::NonFinite { field } => write!(f, "snapshot field `{field}` is not finite"),
            Self::PaddleOutOfBounds { x } => write!(f, "snapshot paddle x {x} is outside the field"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl Snapshot {
    /// Capture the resumable part of a session
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            paddle: PaddleSnapshot { x: state.paddle.x },
            ball: BallSnapshot {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                vx: state.ball.vel.x,
                vy: state.ball.vel.y,
            },
            bricks: state.bricks.alive_flags(),
        }
    }

    /// Check the snapshot fits a grid built from `settings`
    pub fn validate(&self, settings: &Settings) -> Result<(), SnapshotError> {
        let expected = settings.brick_count();
        if self.bricks.len() != expected {
            return Err(SnapshotError::BrickCountMismatch {
                expected,
                actual: self.bricks.len(),
            });
        }
        if self.lives == 0 {
            return Err(SnapshotError::NoLivesLeft);
        }
        if self.lives > settings.starting_lives {
            return Err(SnapshotError::TooManyLives {
                lives: self.lives,
                max: settings.starting_lives,
            });
        }
        for (field, value) in [
            ("paddle.x", self.paddle.x),
            ("ball.x", self.ball.x),
            ("ball.y", self.ball.y),
            ("ball.vx", self.ball.vx),
            ("ball.vy", self.ball.vy),
        ] {
            if !value.is_finite() {
                return Err(SnapshotError::NonFinite { field });
            }
        }
        let half = settings.paddle_width / 2.0;
        if self.paddle.x < half || self.paddle.x > settings.field_width - half {
            return Err(SnapshotError::PaddleOutOfBounds { x: self.paddle.x });
        }
        Ok(())
    }

    /// Build a running session from this snapshot.
    ///
    /// The grid is built fresh from `settings` and the saved aliveness applied
    /// on top; nothing is touched if validation fails.
    pub fn restore(&self, settings: Settings) -> Result<GameState, SnapshotError> {
        self.validate(&settings)?;

        let mut state = GameState::new(settings);
        state.score = self.score;
        state.lives = self.lives;
        state.paddle.x = self.paddle.x;
        state.ball.pos = Vec2::new(self.ball.x, self.ball.y);
        state.ball.vel = Vec2::new(self.ball.vx, self.ball.vy);
        state.bricks.restore_flags(&self.bricks);
        state.phase = SessionPhase::Running;
        Ok(state)
    }
}
