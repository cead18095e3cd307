//! Brickfall - A single-screen brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, collisions, session state)
//! - `persistence`: Snapshot and score history files
//! - `platform`: Clock, fixed-step driver and directional input
//! - `renderer`: Plain-data frame views and a text renderer
//! - `settings`: Data-driven game configuration

pub mod autopilot;
pub mod game;
pub mod history;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use history::ScoreHistory;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 110;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults - paddle centre sits PADDLE_OFFSET above the bottom edge
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    pub const PADDLE_OFFSET: f32 = 40.0;
    pub const PADDLE_MAX_SPEED: f32 = 10.0;

    /// Ball defaults (speed is per tick, not per second)
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_SPEED: f32 = 5.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_HEIGHT: f32 = 22.0;
    /// Space left above the grid for the score/lives HUD
    pub const BRICK_TOP_OFFSET: f32 = 60.0;
    pub const BRICK_VALUE: u32 = 1;

    pub const STARTING_LIVES: u32 = 3;

    /// Number of finished-session scores kept in the history
    pub const HISTORY_LEN: usize = 5;
}
