//! Startup settings read from `ESCAPE_*` environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::search::Algorithm;
use crate::session::{Difficulty, SessionConfig};

pub const DIFFICULTY_VAR: &str = "ESCAPE_DIFFICULTY";
pub const ALGORITHM_VAR: &str = "ESCAPE_ALGORITHM";
pub const SHOW_PATH_VAR: &str = "ESCAPE_SHOW_PATH";
pub const SEED_VAR: &str = "ESCAPE_SEED";
pub const LOG_DIR_VAR: &str = "ESCAPE_LOG_DIR";

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub algorithm: Algorithm,
    pub show_path: bool,
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            difficulty: session.difficulty,
            algorithm: session.algorithm,
            show_path: session.show_path,
            seed: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset or blank variables keep their defaults; anything else must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(value) = get(DIFFICULTY_VAR) {
            settings.difficulty = value.parse()?;
        }
        if let Some(value) = get(ALGORITHM_VAR) {
            settings.algorithm = value.parse()?;
        }
        if let Some(value) = get(SHOW_PATH_VAR) {
            settings.show_path = parse_toggle(SHOW_PATH_VAR, &value)?;
        }
        if let Some(value) = get(SEED_VAR) {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::NotANumber {
                    var: SEED_VAR,
                    value: value.clone(),
                })?;
            settings.seed = Some(seed);
        }
        if let Some(value) = get(LOG_DIR_VAR) {
            settings.log_dir = PathBuf::from(value);
        }

        Ok(settings)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            difficulty: self.difficulty,
            algorithm: self.algorithm,
            show_path: self.show_path,
        }
    }
}

fn parse_toggle(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(ConfigError::NotAToggle {
            var,
            value: value.to_string(),
        }),
    }
}
