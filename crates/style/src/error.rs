//! Style engine error types

use std::path::PathBuf;
use thiserror::Error;

/// Style engine result type
pub type StyleResult<T> = Result<T, StyleError>;

/// Failures while loading the style tables. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Style engine errors
#[derive(Debug, Error)]
pub enum StyleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid attribute pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
