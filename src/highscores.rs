//! High score persistence
//!
//! The best score is stored as a single integer in a plain-text file.
//! Read once at startup, written once at shutdown.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "dodger_high_score.txt";

/// Errors reading or writing the high score file
#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    /// IO error
    #[error("high score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File exists but does not hold an integer
    #[error("high score file {} does not contain a score: {contents:?}", .path.display())]
    Parse { path: PathBuf, contents: String },
}

/// The high score file on disk
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored high score
    ///
    /// A missing file means no score has been recorded yet and yields 0.
    /// Surrounding whitespace is ignored.
    pub fn load(&self) -> Result<u32, HighScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score file at {}, starting at 0", self.path.display());
                return Ok(0);
            }
            Err(source) => {
                return Err(HighScoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let score = contents
            .trim()
            .parse::<u32>()
            .map_err(|_| HighScoreError::Parse {
                path: self.path.clone(),
                contents: contents.clone(),
            })?;
        log::info!("Loaded high score {} from {}", score, self.path.display());
        Ok(score)
    }

    /// Write the high score, replacing any previous value
    ///
    /// Writes a sibling temp file then renames it over the target so a crash
    /// mid-write leaves the old score intact.
    pub fn save(&self, score: u32) -> Result<(), HighScoreError> {
        let io_err = |source: io::Error| HighScoreError::Io {
            path: self.path.clone(),
            source,
        };

        let tmp = self.tmp_path();
        fs::write(&tmp, score.to_string()).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}
