//! Configuration models.

pub mod config;
pub mod filter;
mod lenient;

pub use config::{
    level_name, BeautifyConfig, ConcurrencyConfig, CrawlConfig, FilterConfig, LogFormat,
    LoggingConfig, LoginConfig, RawBeautify, RawConcurrent, RawConfig, RawFilter, RawLog,
    RawLogin, RawRequestDelay, RawScrape, RequestDelayConfig, ScrapeConfig,
};
pub use filter::{FilterLevel, FilterPeriod, LevelCode};
