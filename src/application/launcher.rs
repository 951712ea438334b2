//! Start-up sequence shared by every command.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::models::CrawlConfig;
use crate::domain::ports::CrawlPipeline;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::config_gate::{ConfigGate, ConfigWarning, Validated};

/// A validated configuration with logging up and running.
pub struct Session {
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
    /// Gate result
    pub validated: Validated,
    logger: LoggerImpl,
}

impl Session {
    /// The canonical configuration.
    pub const fn config(&self) -> &CrawlConfig {
        &self.validated.config
    }

    /// Repairs the gate made.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.validated.warnings
    }

    /// Whether events also go to `sgacrawl.log`.
    pub const fn logs_to_file(&self) -> bool {
        self.logger.writes_file()
    }
}

/// Load and validate the configuration, then start logging as configured.
///
/// Gate warnings are emitted as `warn` events once logging is up.
pub fn prepare(config_path: &Path) -> Result<Session> {
    let loaded = ConfigLoader::load(config_path)?;
    let validated = ConfigGate::validate(loaded.raw)?;

    let logger = LoggerImpl::init(&LogConfig::from_settings(&validated.config.log));

    if let Some(path) = &loaded.source {
        info!(path = %path.display(), "using config file");
    }
    for warning in &validated.warnings {
        warn!(field = warning.field(), "{warning}");
    }
    info!("finished processing config file successfully");

    Ok(Session {
        source: loaded.source,
        validated,
        logger,
    })
}

/// Validate the configuration and hand it to the crawl pipeline.
pub fn launch(config_path: &Path, pipeline: &dyn CrawlPipeline) -> Result<()> {
    let session = prepare(config_path)?;
    let config = session.config();

    info!(
        year = config.filter.year,
        level = %config.filter.level,
        period = %config.filter.period,
        threads = config.concurrent.threads,
        authenticated = config.login.has_credentials(),
        log_file = session.logs_to_file(),
        "starting program"
    );

    pipeline.crawl(config).context("crawl pipeline failed")
}
