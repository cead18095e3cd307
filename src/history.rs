//! Recent score history
//!
//! The last few finished-session scores, oldest first. Stored on disk as a
//! JSON array of strings with the most recent score trailing.

use std::collections::VecDeque;

use crate::consts::HISTORY_LEN;

/// Bounded most-recent score list
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreHistory {
    capacity: usize,
    entries: VecDeque<u32>,
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl ScoreHistory {
    /// Create an empty history keeping at most `capacity` scores
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Append a final score, evicting the oldest beyond capacity
    pub fn push(&mut self, score: u32) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(score);
    }

    /// Scores oldest first
    pub fn scores(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().copied()
    }

    pub fn latest(&self) -> Option<u32> {
        self.entries.back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as the on-disk JSON array of strings
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<String> = self.entries.iter().map(u32::to_string).collect();
        serde_json::to_string(&entries)
    }

    /// Decode the on-disk form. Entries that are not scores are skipped and
    /// only the trailing `capacity` scores are kept.
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let raw: Vec<String> = serde_json::from_str(json)?;
        let mut history = Self::new(capacity);
        for entry in raw {
            match entry.trim().parse::<u32>() {
                Ok(score) => history.push(score),
                Err(_) => log::warn!("Skipping unreadable history entry {entry:?}"),
            }
        }
        Ok(history)
    }
}
