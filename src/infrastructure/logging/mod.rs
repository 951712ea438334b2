//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON console output on stderr
//! - Optional JSON log file (`sgacrawl.log`)

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, LOG_FILE_NAME};
pub use logger::LoggerImpl;
