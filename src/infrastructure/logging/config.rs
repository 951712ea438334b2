//! Logger settings.

use std::path::PathBuf;
use tracing::Level;

pub use crate::domain::models::LogFormat;
use crate::domain::models::LoggingConfig;

/// File written when `log.toFile` is enabled.
pub const LOG_FILE_NAME: &str = "sgacrawl.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level, overridable through `RUST_LOG`
    pub level: Level,

    /// Console output format
    pub format: LogFormat,

    /// Directory for the log file (if None logs only to stderr)
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

impl LogConfig {
    /// Build from the validated `log` section; the file lands in the
    /// working directory.
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        Self {
            level: settings.level,
            format: settings.format,
            log_dir: settings.to_file.then(|| PathBuf::from(".")),
        }
    }
}
