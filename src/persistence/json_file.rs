//! JSON file backed progress store

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{
    DEFAULT_HIGHSCORE, DEFAULT_UNLOCKED_LEVELS, HIGHSCORE_KEY, PersistError, ProgressStore,
    UNLOCKED_LEVELS_KEY, clamp_unlocked,
};

/// Stores each scalar in its own small JSON document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    highscore_path: PathBuf,
    progress_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(highscore_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        Self {
            highscore_path: highscore_path.into(),
            progress_path: progress_path.into(),
        }
    }

    pub fn highscore_path(&self) -> &Path {
        &self.highscore_path
    }

    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }
}

fn read_scalar(path: &Path, key: &'static str) -> Result<u64, PersistError> {
    let text = fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&text)?;
    doc.get(key)
        .and_then(Value::as_u64)
        .ok_or(PersistError::MissingKey(key))
}

fn write_scalar(path: &Path, key: &'static str, value: u64) -> Result<(), PersistError> {
    let mut doc = Map::new();
    doc.insert(key.to_string(), Value::from(value));
    let text = serde_json::to_string(&Value::Object(doc))?;
    fs::write(path, text)?;
    Ok(())
}

/// Read a scalar; on any fault log it, rewrite the default and return it
fn load_or_reset(path: &Path, key: &'static str, default: u64) -> u64 {
    match read_scalar(path, key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Resetting {} ({}): {}", path.display(), key, err);
            save_logged(path, key, default);
            default
        }
    }
}

fn save_logged(path: &Path, key: &'static str, value: u64) {
    if let Err(err) = write_scalar(path, key, value) {
        log::warn!("Failed to save {} to {}: {}", key, path.display(), err);
    }
}

impl ProgressStore for JsonFileStore {
    fn load_highscore(&mut self) -> u64 {
        load_or_reset(&self.highscore_path, HIGHSCORE_KEY, DEFAULT_HIGHSCORE)
    }

    fn save_highscore(&mut self, score: u64) {
        save_logged(&self.highscore_path, HIGHSCORE_KEY, score);
    }

    fn load_unlocked_levels(&mut self) -> u32 {
        let raw = load_or_reset(
            &self.progress_path,
            UNLOCKED_LEVELS_KEY,
            DEFAULT_UNLOCKED_LEVELS as u64,
        );
        clamp_unlocked(raw)
    }

    fn save_unlocked_levels(&mut self, levels: u32) {
        save_logged(&self.progress_path, UNLOCKED_LEVELS_KEY, levels as u64);
        log::info!("Progress saved: {} levels unlocked", levels);
    }
}
