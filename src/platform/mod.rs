//! Platform abstraction layer
//!
//! Everything between the simulation and the outside world:
//! - Time and the fixed-step accumulator
//! - Directional input
//! - The session driver loop

pub mod input;
pub mod runner;
pub mod time;

pub use input::Direction;
pub use runner::{PauseWindow, RunOptions, RunSummary, StopReason, run_session};
pub use time::{Clock, FixedStep, ManualClock, SystemClock};
