//! Save/load persistence
//!
//! Two JSON files under one data directory:
//! - `save.json`: snapshot of an unfinished session, written on quit
//! - `history.json`: recent final scores, rewritten on every session end
//!
//! Writes go to a temp file first and are renamed into place, so a crash
//! mid-write never leaves a truncated save behind.

mod error;

pub use error::PersistError;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::history::ScoreHistory;
use crate::sim::Snapshot;

pub const SNAPSHOT_FILE: &str = "save.json";
pub const HISTORY_FILE: &str = "history.json";

/// File-backed store for snapshots and score history
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path().is_file()
    }

    /// Write the snapshot, replacing any previous one
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let path = self.snapshot_path();
        let json = serde_json::to_string(snapshot).map_err(|source| PersistError::Parse {
            path: path.clone(),
            source,
        })?;
        self.write_atomic(&path, &json)?;
        log::info!("Game saved (score {}, lives {})", snapshot.score, snapshot.lives);
        Ok(())
    }

    /// Read the snapshot. `Ok(None)` when there is nothing to resume.
    pub fn load_snapshot(&self) -> Result<Option<Snapshot>, PersistError> {
        let path = self.snapshot_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PersistError::Io { path, source }),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| PersistError::Parse { path, source })
    }

    /// Delete the snapshot. Returns whether one existed.
    pub fn clear_snapshot(&self) -> Result<bool, PersistError> {
        let path = self.snapshot_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Saved game cleared");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(PersistError::Io { path, source }),
        }
    }

    /// Load the score history. Missing or malformed files give an empty one.
    pub fn load_history(&self, capacity: usize) -> ScoreHistory {
        let path = self.history_path();
        match fs::read_to_string(&path) {
            Ok(json) => match ScoreHistory::from_json(&json, capacity) {
                Ok(history) => {
                    log::info!("Loaded {} recent scores", history.len());
                    history
                }
                Err(err) => {
                    log::warn!("Ignoring malformed history {}: {err}", path.display());
                    ScoreHistory::new(capacity)
                }
            },
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    log::warn!("Cannot read history {}: {err}", path.display());
                } else {
                    log::info!("No score history found, starting fresh");
                }
                ScoreHistory::new(capacity)
            }
        }
    }

    /// Rewrite the whole history file
    pub fn save_history(&self, history: &ScoreHistory) -> Result<(), PersistError> {
        let path = self.history_path();
        let json = history.to_json().map_err(|source| PersistError::Parse {
            path: path.clone(),
            source,
        })?;
        self.write_atomic(&path, &json)?;
        log::info!("Score history saved ({} entries)", history.len());
        Ok(())
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), PersistError> {
        let io_err = |source: std::io::Error| PersistError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameState;

    fn store() -> (tempfile::TempDir, SaveStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let (_dir, store) = store();
        assert!(store.load_snapshot().unwrap().is_none());
        assert!(!store.has_snapshot());
        assert!(!store.clear_snapshot().unwrap());
    }

    #[test]
    fn test_snapshot_save_load_clear() {
        let (_dir, store) = store();
        let mut state = GameState::new(Settings::default());
        state.score = 4;
        state.bricks.bricks[2].destroy();
        let snapshot = Snapshot::capture(&state);

        store.save_snapshot(&snapshot).unwrap();
        assert!(store.has_snapshot());
        assert_eq!(store.load_snapshot().unwrap(), Some(snapshot));

        assert!(store.clear_snapshot().unwrap());
        assert!(!store.has_snapshot());
    }

    #[test]
    fn test_malformed_snapshot_is_parse_error() {
        let (_dir, store) = store();
        fs::write(store.snapshot_path(), r#"{"score": 3, "lives":"#).unwrap();
        assert!(matches!(
            store.load_snapshot(),
            Err(PersistError::Parse { .. })
        ));
    }

    #[test]
    fn test_history_round_trip() {
        let (_dir, store) = store();
        let mut history = ScoreHistory::new(5);
        history.push(3);
        history.push(17);
        store.save_history(&history).unwrap();

        let raw = fs::read_to_string(store.history_path()).unwrap();
        assert_eq!(raw, r#"["3","17"]"#);
        assert_eq!(store.load_history(5), history);
    }

    #[test]
    fn test_missing_or_bad_history_is_empty() {
        let (_dir, store) = store();
        assert!(store.load_history(5).is_empty());

        fs::write(store.history_path(), "not json at all").unwrap();
        assert!(store.load_history(5).is_empty());
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("nested").join("data"));
        store.save_history(&ScoreHistory::default()).unwrap();
        assert!(store.history_path().is_file());
    }
}
