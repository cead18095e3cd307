//! Session driver
//!
//! An explicit fixed-timestep loop: wait on the clock, convert elapsed time
//! into ticks, step the game, render every so often. Single-threaded; a tick
//! always runs to completion before the next is considered.

use super::input::Direction;
use super::time::{Clock, FixedStep};
use crate::Game;
use crate::autopilot::{Autopilot, Command};
use crate::persistence::PersistError;
use crate::renderer::{FrameView, Renderer};
use crate::sim::{GameEvent, SessionPhase};

/// Limits and hooks for one driver run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop (without saving) after this many ticks
    pub max_ticks: Option<u64>,
    /// Quit after this many ticks, saving the unfinished session
    pub quit_after: Option<u64>,
    /// Render every N ticks; `None` renders only the final frame
    pub render_every: Option<u64>,
    /// Pause once mid-session and resume after a while
    pub pause: Option<PauseWindow>,
}

/// A single pause: taken when `at` ticks have run, held for `ticks` tick slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseWindow {
    pub at: u64,
    pub ticks: u64,
}

/// Why the driver returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Session reached Victory or Defeat
    Ended,
    /// Quit requested; `saved` tells whether a snapshot was written
    Quit { saved: bool },
    MaxTicks,
    /// The session was not running to begin with
    NotRunning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub ticks: u64,
    pub phase: SessionPhase,
    pub score: u32,
    pub lives: u32,
    pub bricks_destroyed: usize,
    pub lives_lost: u32,
    /// Tick slots spent paused
    pub paused_ticks: u64,
}

/// Drive a running session until it ends or a limit is reached
pub fn run_session<C, R>(
    game: &mut Game,
    clock: &mut C,
    renderer: &mut R,
    autopilot: Option<&Autopilot>,
    options: &RunOptions,
) -> Result<RunSummary, PersistError>
where
    C: Clock + ?Sized,
    R: Renderer + ?Sized,
{
    let mut ticks = 0u64;
    let mut bricks_destroyed = 0usize;
    let mut lives_lost = 0u32;
    let mut paused_ticks = 0u64;
    // Direction the autopilot is holding, as a key would be
    let mut held: Option<Direction> = None;

    let reason = if game.phase() != SessionPhase::Running {
        StopReason::NotRunning
    } else {
        let mut step = FixedStep::new(game.settings().tick_interval());
        let mut last = clock.now();
        log::info!(
            "Driving session at {} ticks/s ({:?} per tick)",
            game.settings().tick_rate,
            step.step()
        );

        'frames: loop {
            clock.sleep(step.remaining());
            let now = clock.now();
            let due = step.advance(now.saturating_sub(last));
            last = now;

            for _ in 0..due {
                if let Some(reason) = check_limits(game, ticks, options)? {
                    break 'frames reason;
                }

                if let Some(window) = options.pause {
                    if ticks == window.at
                        && paused_ticks == 0
                        && window.ticks > 0
                        && game.phase() == SessionPhase::Running
                    {
                        game.toggle_pause();
                    }
                    if game.phase() == SessionPhase::Paused {
                        paused_ticks += 1;
                        if paused_ticks >= window.ticks {
                            game.toggle_pause();
                        }
                        continue;
                    }
                }

                if let Some(autopilot) = autopilot {
                    match autopilot.decide(game.state()) {
                        Command::Move(direction) if held != Some(direction) => {
                            if let Some(previous) = held.replace(direction) {
                                game.release(previous);
                            }
                            game.press(direction);
                        }
                        Command::Move(_) => {}
                        Command::Stop => {
                            held = None;
                            game.stop();
                        }
                    }
                }

                for event in game.step()? {
                    match event {
                        GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                        GameEvent::LifeLost { .. } => lives_lost += 1,
                        _ => {}
                    }
                }
                ticks += 1;

                if let Some(every) = options.render_every {
                    if every > 0 && ticks % every == 0 {
                        renderer.render(&FrameView::from_state(game.state()));
                    }
                }

                if game.phase().is_ended() {
                    break 'frames StopReason::Ended;
                }
            }
        }
    };

    renderer.render(&FrameView::from_state(game.state()));

    let state = game.state();
    Ok(RunSummary {
        reason,
        ticks,
        phase: state.phase,
        score: state.score,
        lives: state.lives,
        bricks_destroyed,
        lives_lost,
        paused_ticks,
    })
}

fn check_limits(
    game: &mut Game,
    ticks: u64,
    options: &RunOptions,
) -> Result<Option<StopReason>, PersistError> {
    if options.quit_after.is_some_and(|limit| ticks >= limit) {
        let saved = game.quit()?;
        return Ok(Some(StopReason::Quit { saved }));
    }
    if options.max_ticks.is_some_and(|limit| ticks >= limit) {
        return Ok(Some(StopReason::MaxTicks));
    }
    Ok(None)
}
