//! Error types for the game.
//!
//! The simulation itself never fails; these cover the I/O around it
//! (terminal, config file, high-score file) and config validation.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// An I/O operation failed.
    Io {
        /// What was being attempted, for the log line.
        context: String,
        source: io::Error,
    },

    /// The config file exists but is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse { path: PathBuf, message: String },

    /// A config value is outside the range the simulation can run with.
    InvalidConfig {
        name: &'static str,
        value: i64,
        expected: &'static str,
    },
}

impl GameError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        GameError::Io {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io { context, source } => write!(f, "{}: {}", context, source),
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(f, "config '{}' = {} is invalid (expected {})", name, value, expected),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(source: io::Error) -> Self {
        GameError::io("terminal I/O", source)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
