//! Session progress: high score and unlocked levels
//!
//! Owned by the application shell and lent to each level run. Both values
//! only ever grow; the shell persists them when they do.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::persistence::ProgressStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub high_score: u64,
    /// Highest playable level, 1-based
    pub unlocked_levels: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            high_score: 0,
            unlocked_levels: 1,
        }
    }
}

impl ProgressState {
    /// Read both values from the store
    pub fn load<S: ProgressStore + ?Sized>(store: &mut S) -> Self {
        let progress = Self {
            high_score: store.load_highscore(),
            unlocked_levels: store.load_unlocked_levels(),
        };
        log::info!(
            "Loaded progress: high score {}, {} levels unlocked",
            progress.high_score,
            progress.unlocked_levels
        );
        progress
    }

    /// Raise the high score to `score`; returns true on a new record
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Unlock every level up to `level` (capped at the last level)
    ///
    /// Returns true if the unlocked count grew.
    pub fn unlock(&mut self, level: u32) -> bool {
        let level = level.min(LEVEL_COUNT);
        if level > self.unlocked_levels {
            self.unlocked_levels = level;
            true
        } else {
            false
        }
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.unlocked_levels
    }
}
