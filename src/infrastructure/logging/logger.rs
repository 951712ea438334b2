//! Global tracing subscriber setup.

use super::config::{LogConfig, LogFormat, LOG_FILE_NAME};
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logger implementation using tracing
pub struct LoggerImpl {
    guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Initialize the global logger with the given configuration
    ///
    /// Console output goes to stderr so command output on stdout stays
    /// parseable. When `log_dir` is set, JSON lines are also written to
    /// `sgacrawl.log` in that directory.
    ///
    /// If a global subscriber is already installed it is left in place and
    /// no log file is opened.
    pub fn init(config: &LogConfig) -> Self {
        if tracing::dispatcher::has_been_set() {
            tracing::debug!("global subscriber already installed, keeping it");
            return Self { guard: None };
        }

        let env_filter = || {
            EnvFilter::builder()
                .with_default_directive(config.level.into())
                .from_env_lossy()
        };

        let (file_layer, guard) = match config.log_dir {
            Some(ref log_dir) => {
                let (non_blocking_file, guard) =
                    tracing_appender::non_blocking(rolling::never(log_dir, LOG_FILE_NAME));

                // File layer - always JSON for structured logging
                let file_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(env_filter());

                (Some(file_layer), Some(guard))
            }
            None => (None, None),
        };

        let console_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(env_filter())
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(env_filter())
                .boxed(),
        };

        let installed = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_ok();

        if !installed {
            // Lost the race to another initializer; the file layer went with it.
            return Self { guard: None };
        }

        tracing::info!(
            level = %config.level,
            format = config.format.as_str(),
            file_output = guard.is_some(),
            "logger initialized"
        );
        Self { guard }
    }

    /// Whether this logger owns a file writer that receives events
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}
