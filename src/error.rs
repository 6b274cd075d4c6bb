use std::io;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("unknown algorithm {0:?} (expected bfs or dfs)")]
    UnknownAlgorithm(String),
    #[error("{var}: expected on/off, got {value:?}")]
    NotAToggle { var: &'static str, value: String },
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not install log subscriber: {0}")]
    Logging(String),
}
