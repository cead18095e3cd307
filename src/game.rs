//! Game controller
//!
//! Owns the session state together with its save store and score history,
//! and maps the four user commands (new, resume, pause toggle, quit) onto
//! session transitions. Side effects of a session ending live here so the
//! simulation itself never touches the filesystem.

use crate::history::ScoreHistory;
use crate::persistence::{PersistError, SaveStore};
use crate::platform::input::{self, Direction};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Outcome, SessionPhase, Snapshot, tick};

pub struct Game {
    pub(crate) state: GameState,
    store: SaveStore,
    history: ScoreHistory,
}

impl Game {
    /// Start in the menu with history loaded from the store
    pub fn new(settings: Settings, store: SaveStore) -> Self {
        let history = store.load_history(settings.history_len);
        Self {
            state: GameState::new(settings),
            store,
            history,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Recent final scores, oldest first
    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    /// Throw away any saved game and start a brand-new session
    pub fn new_session(&mut self) -> Result<(), PersistError> {
        self.store.clear_snapshot()?;
        self.state.reset();
        log::info!(
            "New session: {} bricks, {} lives",
            self.state.bricks.len(),
            self.state.lives
        );
        Ok(())
    }

    /// Continue the saved session, or start fresh if nothing was saved.
    ///
    /// Returns whether a save was resumed. An unreadable or unusable save is
    /// an error and leaves the current state and the file untouched.
    pub fn resume_session(&mut self) -> Result<bool, PersistError> {
        let Some(snapshot) = self.store.load_snapshot()? else {
            log::info!("No saved game to resume, starting a new one");
            self.new_session()?;
            return Ok(false);
        };

        let state = snapshot
            .restore(self.state.settings.clone())
            .map_err(|source| PersistError::Invalid {
                path: self.store.snapshot_path(),
                source,
            })?;
        self.state = state;
        log::info!(
            "Resumed session: score {}, lives {}, {} bricks left",
            self.state.score,
            self.state.lives,
            self.state.bricks.alive_count()
        );
        Ok(true)
    }

    /// Running ⇄ Paused
    pub fn toggle_pause(&mut self) -> SessionPhase {
        let phase = self.state.toggle_pause();
        log::info!("Phase now {phase:?}");
        phase
    }

    pub fn press(&mut self, direction: Direction) {
        input::press(&mut self.state.paddle, direction);
    }

    pub fn release(&mut self, direction: Direction) {
        input::release(&mut self.state.paddle, direction);
    }

    pub fn stop(&mut self) {
        input::stop(&mut self.state.paddle);
    }

    /// Run one tick and handle a session ending
    pub fn step(&mut self) -> Result<Vec<GameEvent>, PersistError> {
        let events = tick(&mut self.state);
        for event in &events {
            if let GameEvent::SessionEnded(outcome) = event {
                self.finish_session(*outcome)?;
            }
        }
        Ok(events)
    }

    /// Save an unfinished session before teardown. Returns whether a save was
    /// written.
    pub fn quit(&mut self) -> Result<bool, PersistError> {
        if !self.state.phase.is_in_progress() {
            return Ok(false);
        }
        self.store.save_snapshot(&Snapshot::capture(&self.state))?;
        Ok(true)
    }

    fn finish_session(&mut self, outcome: Outcome) -> Result<(), PersistError> {
        self.history.push(self.state.score);
        self.store.save_history(&self.history)?;
        // An ended game has nothing to resume
        self.store.clear_snapshot()?;
        log::info!("Recorded {:?} with score {}", outcome, self.state.score);
        Ok(())
    }
}
