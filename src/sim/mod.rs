//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (grid creation order)
//! - No rendering, clock or file dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Axis, BrickHit, Contacts, Rect, reflection_axis, resolve};
pub use snapshot::{BallSnapshot, PaddleSnapshot, Snapshot, SnapshotError};
pub use state::{Ball, Brick, BrickGrid, GameState, Outcome, Paddle, SessionPhase};
pub use tick::{GameEvent, tick};
