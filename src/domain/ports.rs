//! Ports implemented outside this crate.

use crate::domain::models::CrawlConfig;

/// The crawl pipeline that consumes a validated configuration.
///
/// Implementations fetch and parse the SGA pages and persist the results.
/// They receive the configuration already normalized and must not
/// re-validate it.
pub trait CrawlPipeline {
    /// Run the crawl once.
    fn crawl(&self, config: &CrawlConfig) -> anyhow::Result<()>;
}
