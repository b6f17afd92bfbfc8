use super::{DEFAULT_HIGHSCORE, DEFAULT_UNLOCKED_LEVELS, ProgressStore, clamp_unlocked};

/// In-process store for tests and sessions that should not touch disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    pub highscore: u64,
    pub unlocked_levels: u32,
    /// Number of save calls, both keys
    pub saves: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            highscore: DEFAULT_HIGHSCORE,
            unlocked_levels: DEFAULT_UNLOCKED_LEVELS,
            saves: 0,
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load_highscore(&mut self) -> u64 {
        self.highscore
    }

    fn save_highscore(&mut self, score: u64) {
        self.highscore = score;
        self.saves += 1;
    }

    fn load_unlocked_levels(&mut self) -> u32 {
        clamp_unlocked(self.unlocked_levels as u64)
    }

    fn save_unlocked_levels(&mut self, levels: u32) {
        self.unlocked_levels = levels;
        self.saves += 1;
    }
}
