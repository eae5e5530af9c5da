//! High-score persistence: a single integer in a plain-text file.

use std::path::PathBuf;

use crate::error::{GameError, GameResult};

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    /// Stored score, or 0 if the file is missing, unreadable or not a number.
    pub fn load(&self) -> u32 {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                log::info!("no high score at {} ({}); starting at 0", self.path.display(), e);
                return 0;
            }
        };
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return 0;
        }
        match trimmed.parse::<u32>() {
            Ok(score) => {
                log::info!("loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) => {
                log::warn!(
                    "ignoring corrupt high score file {}: {}",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> GameResult<()> {
        std::fs::write(&self.path, score.to_string()).map_err(|e| {
            GameError::io(
                format!("writing high score to {}", self.path.display()),
                e,
            )
        })
    }
}
