//! Game settings
//!
//! Every tunable the simulation reads. Loaded from an optional JSON file;
//! missing fields fall back to the defaults in [`crate::consts`].

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bounds that keep allocations and the HUD sane
pub const MAX_BRICKS: usize = 10_000;
pub const MAX_LIVES: u32 = 99;
pub const MAX_HISTORY_LEN: usize = 100;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the bottom edge to the paddle centre
    pub paddle_offset: f32,
    /// Horizontal speed while a direction is held (per tick)
    pub paddle_max_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch speed magnitude (per tick)
    pub ball_speed: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_height: f32,
    pub brick_top_offset: f32,
    pub brick_value: u32,

    // === Session ===
    pub starting_lives: u32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Finished-session scores kept in the history
    pub history_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_offset: PADDLE_OFFSET,
            paddle_max_speed: PADDLE_MAX_SPEED,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_height: BRICK_HEIGHT,
            brick_top_offset: BRICK_TOP_OFFSET,
            brick_value: BRICK_VALUE,

            starting_lives: STARTING_LIVES,
            tick_rate: TICK_RATE,
            history_len: HISTORY_LEN,
        }
    }
}

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "malformed settings file: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings = match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).map_err(SettingsError::Parse)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => return Err(SettingsError::Io(err)),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_max_speed", self.paddle_max_speed)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_speed", self.ball_speed)?;
        positive("brick_height", self.brick_height)?;

        if self.paddle_width > self.field_width {
            return Err(SettingsError::Invalid {
                field: "paddle_width",
                reason: "paddle is wider than the field",
            });
        }
        if !(0.0..self.field_height).contains(&self.paddle_offset) {
            return Err(SettingsError::Invalid {
                field: "paddle_offset",
                reason: "paddle must sit inside the field",
            });
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(SettingsError::Invalid {
                field: "brick_rows",
                reason: "grid needs at least one row and one column",
            });
        }
        if self
            .brick_rows
            .checked_mul(self.brick_cols)
            .is_none_or(|count| count > MAX_BRICKS)
        {
            return Err(SettingsError::Invalid {
                field: "brick_cols",
                reason: "grid has too many bricks",
            });
        }
        if self.brick_width() < 1.0 {
            return Err(SettingsError::Invalid {
                field: "brick_cols",
                reason: "bricks would be narrower than one unit",
            });
        }
        if !(1..=MAX_LIVES).contains(&self.starting_lives) {
            return Err(SettingsError::Invalid {
                field: "starting_lives",
                reason: "must be between 1 and 99",
            });
        }
        if !(1..=MAX_HISTORY_LEN).contains(&self.history_len) {
            return Err(SettingsError::Invalid {
                field: "history_len",
                reason: "must be between 1 and 100",
            });
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_rate",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Brick width: the field split evenly between columns, whole pixels
    pub fn brick_width(&self) -> f32 {
        (self.field_width / self.brick_cols as f32).floor()
    }

    /// Total bricks in a fresh grid
    pub fn brick_count(&self) -> usize {
        self.brick_rows.saturating_mul(self.brick_cols)
    }

    /// Fixed y of the paddle centre
    pub fn paddle_y(&self) -> f32 {
        self.field_height - self.paddle_offset
    }

    /// Wall-clock length of one tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate.max(1)))
    }
}
