use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broken invariants surfaced by the simulation core.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GameError {
    #[error("a snake needs at least one segment")]
    EmptySnake,
    #[error("no free cell left on the board for food")]
    BoardFull,
}

/// Failures while loading user settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}
