//! Clocks and the fixed-step accumulator
//!
//! The driver never sleeps or reads the time directly; it goes through a
//! [`Clock`] so tests and headless runs can use [`ManualClock`].

use std::time::{Duration, Instant};

use crate::consts::MAX_SUBSTEPS;

/// Source of monotonic time that can also wait
pub trait Clock {
    /// Time elapsed since the clock was created
    fn now(&self) -> Duration;
    /// Block (or pretend to) for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when told to. Sleeping advances it instantly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Converts elapsed frame time into a whole number of simulation ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add frame time and return how many ticks to run now.
    ///
    /// Capped at `max_substeps`; time beyond the cap is dropped rather than
    /// carried, to prevent a spiral of death after a long stall.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Time until the next tick is due
    pub fn remaining(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
