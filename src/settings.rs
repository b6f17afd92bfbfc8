//! Game settings
//!
//! Loaded from a JSON file next to the binary. Every field has a default, so
//! a partial file only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::sim::Arena;

/// Ground line as a fraction of the screen height when none is configured
const DEFAULT_GROUND_RATIO: f32 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: i32,
    pub screen_height: i32,
    /// Screen y of the ground surface; `None` puts it at 80% of the height
    pub ground_y: Option<i32>,

    // === Storage ===
    pub highscore_path: PathBuf,
    pub progress_path: PathBuf,

    // === Session ===
    /// Base RNG seed; `None` derives one from the clock
    pub seed: Option<u64>,
    /// Level the demo starts from
    pub start_level: u32,
    /// Pace ticks at the real frame rate instead of running flat out
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            ground_y: Some(780),

            highscore_path: PathBuf::from("highscore.json"),
            progress_path: PathBuf::from("progress.json"),

            seed: None,
            start_level: 1,
            realtime: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("No settings at {} ({}), using defaults", path.display(), err);
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Screen geometry and ground line for the simulation
    pub fn arena(&self) -> Arena {
        let ground_y = self
            .ground_y
            .unwrap_or((self.screen_height as f32 * DEFAULT_GROUND_RATIO) as i32);
        Arena::new(self.screen_width, self.screen_height, ground_y)
    }

    /// Configured seed, or one taken from the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}
