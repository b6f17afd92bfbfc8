//! Progress persistence
//!
//! Two independent scalar documents:
//! - `{"highscore": <int>}`
//! - `{"unlocked_levels": <int>}`
//!
//! Storage faults never reach gameplay. A missing or corrupt document reads
//! as its default, and the default is written back straight away.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::consts::LEVEL_COUNT;

/// JSON key of the high score document
pub const HIGHSCORE_KEY: &str = "highscore";
/// JSON key of the unlocked levels document
pub const UNLOCKED_LEVELS_KEY: &str = "unlocked_levels";

pub const DEFAULT_HIGHSCORE: u64 = 0;
pub const DEFAULT_UNLOCKED_LEVELS: u32 = 1;

/// Persistence errors (internal; the store methods log and recover)
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing or invalid key: {0}")]
    MissingKey(&'static str),
}

/// Durable storage for the two progress scalars
pub trait ProgressStore {
    fn load_highscore(&mut self) -> u64;
    fn save_highscore(&mut self, score: u64);
    fn load_unlocked_levels(&mut self) -> u32;
    fn save_unlocked_levels(&mut self, levels: u32);
}

/// Keep a loaded unlock count inside the playable range
pub(crate) fn clamp_unlocked(levels: u64) -> u32 {
    levels.clamp(DEFAULT_UNLOCKED_LEVELS as u64, LEVEL_COUNT as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unlocked() {
        assert_eq!(clamp_unlocked(0), 1);
        assert_eq!(clamp_unlocked(3), 3);
        assert_eq!(clamp_unlocked(99), LEVEL_COUNT);
    }

    #[test]
    fn test_error_messages() {
        let err = PersistError::MissingKey(HIGHSCORE_KEY);
        assert_eq!(err.to_string(), "Missing or invalid key: highscore");
    }
}
