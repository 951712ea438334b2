//! Configuration management infrastructure
//!
//! Layered configuration using figment:
//! - YAML file loading (`--config`, falling back to `~/.sgacrawl.yaml`)
//! - Environment variable overrides (`SGACRAWL_*`)
//! - Extraction into the loosely typed `RawConfig` the gate consumes

pub mod loader;

pub use loader::{ConfigLoader, LoadedConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
