//! sgacrawl - configuration gate for the SGA crawler
//!
//! sgacrawl harvests classes and career plans from the SGA academic system.
//! Before any crawl work starts, every setting it depends on goes through a
//! single validation pass that rejects invalid configurations and repairs
//! borderline ones.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration models, canonical filters, errors, ports
//! - **Service Layer** (`services`): the configuration gate
//! - **Infrastructure Layer** (`infrastructure`): layered config loading and logging
//! - **Application Layer** (`application`): start-up sequence and crawl hand-off
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use sgacrawl::{ConfigGate, ConfigLoader};
//!
//! let loaded = ConfigLoader::load(".sgacrawl.yaml")?;
//! let validated = ConfigGate::validate(loaded.raw)?;
//! for warning in &validated.warnings {
//!     println!("[warn] {warning}");
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{launch, prepare, Session};
pub use domain::models::{CrawlConfig, FilterLevel, FilterPeriod, RawConfig};
pub use domain::ports::CrawlPipeline;
pub use domain::{ConfigError, ErrorKind};
pub use infrastructure::config::ConfigLoader;
pub use services::{ConfigGate, ConfigWarning, Validated};
