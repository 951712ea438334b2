//! Domain layer for the crawler configuration
//!
//! Raw and validated configuration models, canonical filters, the error
//! taxonomy, and the port the crawl pipeline implements.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{ConfigError, ErrorKind};
