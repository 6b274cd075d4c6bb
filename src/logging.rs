use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::GameError;

const LOG_PREFIX: &str = "prison_escape";
const KEEP_LOGS: usize = 25;

pub fn log_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("{}_{}.log", LOG_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Installs a file-only subscriber; the terminal is owned by the game.
/// Returns the path of this run's log file.
pub fn setup_file_logging(log_dir: &Path) -> Result<PathBuf, GameError> {
    fs::create_dir_all(log_dir)?;

    // Make room for this run's file
    cleanup_old_logs(log_dir, KEEP_LOGS.saturating_sub(1));

    let log_filename = log_file_name(chrono::Local::now());
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&log_filename)
        .build(log_dir)
        .map_err(|e| GameError::Logging(e.to_string()))?;

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prison_escape=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))?;

    Ok(log_dir.join(log_filename))
}

pub fn cleanup_old_logs(log_dir: &Path, keep_count: usize) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|s| s.starts_with(LOG_PREFIX) && s.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();

        // Oldest first; the timestamped names break ties between equal mtimes
        log_files.sort_by_key(|e| {
            (
                e.metadata().ok().and_then(|m| m.modified().ok()),
                e.file_name(),
            )
        });

        if log_files.len() > keep_count {
            for file in log_files.iter().take(log_files.len() - keep_count) {
                let _ = fs::remove_file(file.path());
            }
        }
    }
}
