//! Services operating on the domain models.

pub mod config_gate;

pub use config_gate::{unescape_whitespace, ConfigGate, ConfigWarning, Validated};
