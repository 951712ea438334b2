//! Infrastructure layer module
//!
//! - Configuration management (figment: YAML file + environment)
//! - Logging infrastructure (tracing)

pub mod config;
pub mod logging;
