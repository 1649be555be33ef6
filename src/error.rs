//! Error types for the recoverable I/O around the game.
//!
//! None of these ever stop the game: callers log them and fall back to
//! defaults. Rendering errors stay as SDL2's `String` errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the gameplay tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while loading or saving player settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no per-user config directory available")]
    NoConfigDir,
}
