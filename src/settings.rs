//! Game settings and preferences
//!
//! Read from an optional JSON file in the working directory. Every field has
//! a default, so a partial file (or none at all) is fine.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::DEFAULT_HIGH_SCORE_FILE;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding player.png, obstacle.png and powerup.png
    pub asset_dir: PathBuf,
    /// Plain-text high score file
    pub high_score_file: PathBuf,

    // === Visual Effects ===
    /// Particle bursts on pickups and hits
    pub particles: bool,

    // === Display ===
    /// Wait for vertical blank when presenting
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            particles: true,
            vsync: true,
        }
    }
}

impl Settings {
    /// Settings file name
    pub const FILE_NAME: &'static str = "dodger_settings.json";

    /// Load settings from `path`
    ///
    /// A missing file yields defaults. An unreadable or malformed file is
    /// logged and also yields defaults.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Full path of an asset file
    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.asset_dir.join(file_name)
    }

    /// Present mode implied by `vsync`
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}
