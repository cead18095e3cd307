//! Fixed timestep simulation tick
//!
//! One call is one discrete physics step. There is no delta-time: speeds are
//! expressed per tick, so the tick rate sets the game's pace.

use super::collision;
use super::state::{GameState, Outcome, SessionPhase};

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed { index: usize, value: u32 },
    PaddleHit,
    /// Ball fell out; `remaining` lives left afterwards
    LifeLost { remaining: u32 },
    SessionEnded(Outcome),
}

/// Advance the game state by one tick.
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != SessionPhase::Running {
        return events;
    }

    state.time_ticks += 1;

    state.paddle.advance();
    state.ball.advance();

    let contacts = collision::resolve(
        &mut state.ball,
        &state.paddle,
        &mut state.bricks,
        state.settings.field_width,
    );
    if let Some(hit) = contacts.brick {
        // Score never wraps, even on a save resumed near the limit
        state.score = state.score.saturating_add(hit.value);
        events.push(GameEvent::BrickDestroyed {
            index: hit.index,
            value: hit.value,
        });
    }
    if contacts.paddle {
        events.push(GameEvent::PaddleHit);
    }

    if state.ball.top() > state.settings.field_height {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives > 0 {
            log::debug!("Ball lost, {} lives left", state.lives);
            state.ball.reset_on_paddle(&state.paddle);
        } else {
            end_session(state, Outcome::Defeat, &mut events);
        }
    } else if state.bricks.alive_count() == 0 {
        end_session(state, Outcome::Victory, &mut events);
    }

    events
}

fn end_session(state: &mut GameState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    state.phase = SessionPhase::Ended(outcome);
    log::info!(
        "Session ended ({:?}) with score {} after {} ticks",
        outcome,
        state.score,
        state.time_ticks
    );
    events.push(GameEvent::SessionEnded(outcome));
}
