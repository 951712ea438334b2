//! Raw and validated configuration records.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::Level;

use super::filter::{FilterLevel, FilterPeriod};
use super::lenient;

/// Configuration exactly as read from the layered sources.
///
/// Every key is optional: an absent key stays `None` so the gate can tell
/// "not configured" apart from "configured as zero".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `filter` section
    pub filter: RawFilter,

    /// `request-delay` section
    #[serde(rename = "request-delay")]
    pub request_delay: RawRequestDelay,

    /// `concurrent` section
    pub concurrent: RawConcurrent,

    /// `login` section
    pub login: RawLogin,

    /// Career plan identifiers

    #[serde(
        deserialize_with = "lenient::opt_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub plans: Option<Vec<String>>,

    /// `scrape` section
    pub scrape: RawScrape,

    /// `beautify` section
    pub beautify: RawBeautify,

    /// Minified JSON output

    #[serde(
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub minify: Option<bool>,

    /// `log` section
    pub log: RawLog,
}

impl RawConfig {
    /// True when no recognized key is present at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Raw `filter` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFilter {
    /// Academic year
    #[serde(deserialize_with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,

    /// Program tier, any synonym
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Term, any synonym
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Raw `request-delay` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRequestDelay {
    /// Fixed delay in milliseconds
    #[serde(deserialize_with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub minimum_ms: Option<i64>,

    /// Random extra delay in milliseconds
    #[serde(deserialize_with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub rand_ms: Option<i64>,
}

/// Raw `concurrent` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConcurrent {
    /// Worker threads
    #[serde(deserialize_with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub threads: Option<i64>,

    /// Class buffer capacity
    #[serde(
        rename = "classBufferMax",
        deserialize_with = "lenient::opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_buffer_max: Option<i64>,
}

/// Raw `login` section.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLogin {
    /// SGA user name
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// SGA password
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for RawLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawLogin")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Raw `scrape` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScrape {
    /// Scrape classes
    #[serde(deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub classes: Option<bool>,

    /// Scrape career plans
    #[serde(
        rename = "careerPlans",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub career_plans: Option<bool>,
}

/// Raw `beautify` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBeautify {
    /// JSON line prefix, possibly escaped
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// JSON indent, possibly escaped
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
}

/// Raw `log` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLog {
    /// Also log to a file
    #[serde(
        rename = "toFile",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_file: Option<bool>,

    /// Log level name
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Console log format name
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

const REDACTED: &str = "********";

/// Validated crawler configuration, in canonical form.
///
/// Only the configuration gate builds one of these; the crawl pipeline reads
/// it as-is without re-validating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlConfig {
    /// What to crawl
    pub filter: FilterConfig,

    /// Delay between requests
    #[serde(rename = "request-delay")]
    pub request_delay: RequestDelayConfig,

    /// Worker and buffer sizing
    pub concurrent: ConcurrencyConfig,

    /// SGA credentials
    pub login: LoginConfig,

    /// Career plan identifiers; a single `none` entry when nothing was configured.
    pub plans: Vec<String>,

    /// What to scrape
    pub scrape: ScrapeConfig,

    /// JSON output formatting
    pub beautify: BeautifyConfig,

    /// Write minified JSON
    pub minify: bool,

    /// Logging settings
    pub log: LoggingConfig,
}

/// Canonical crawl filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    /// Academic year, 2000 to 2050
    pub year: u16,
    /// Program tier
    pub level: FilterLevel,
    /// Term
    pub period: FilterPeriod,
}

/// Politeness delay between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestDelayConfig {
    /// Fixed part of the delay, in milliseconds
    pub minimum_ms: u64,
    /// Upper bound of the random extra delay, in milliseconds
    pub rand_ms: u64,
}

/// Worker and buffer sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConcurrencyConfig {
    /// Worker threads; 0 lets the crawler decide
    pub threads: usize,

    /// Capacity of the class producer/consumer buffer (at least 1)
    #[serde(rename = "classBufferMax")]
    pub class_buffer_max: usize,
}

impl ConcurrencyConfig {
    /// True when the crawler picks the thread count itself.
    pub const fn is_auto(&self) -> bool {
        self.threads == 0
    }
}

/// SGA credentials. The user is empty whenever the password is.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginConfig {
    /// User name
    pub user: String,

    /// Password, masked when printed or serialized
    #[serde(serialize_with = "serialize_redacted")]
    pub password: String,
}

impl LoginConfig {
    /// True when both a user and a password are configured.
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginConfig")
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        REDACTED
    }
}

fn serialize_redacted<S: Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(redact(secret))
}

/// What to scrape; at least one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrapeConfig {
    /// Scrape classes
    pub classes: bool,

    /// Scrape career plans
    #[serde(rename = "careerPlans")]
    pub career_plans: bool,
}

/// Output formatting strings, already unescaped to real whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BeautifyConfig {
    /// Line prefix
    pub prefix: String,
    /// Indent unit
    pub indent: String,
}

/// Validated `log` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    /// Also write JSON logs to `sgacrawl.log`
    #[serde(rename = "toFile")]
    pub to_file: bool,

    /// Default level of the log filter
    #[serde(serialize_with = "serialize_level")]
    pub level: Level,

    /// Console log format
    pub format: LogFormat,
}

/// Console log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable, multi-line
    #[default]
    Pretty,
}

impl LogFormat {
    /// Spelling used in config files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(s.to_string()),
        }
    }
}

/// Lowercase name of a level, the spelling config files use.
pub fn level_name(level: Level) -> String {
    level.to_string().to_lowercase()
}

fn serialize_level<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&level_name(*level))
}

impl CrawlConfig {
    /// Flatten into `(dotted key, display value)` pairs.
    ///
    /// The password is masked and beautify strings are escaped back so the
    /// listing stays on one line per key.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter.year", self.filter.year.to_string()),
            ("filter.level", self.filter.level.to_string()),
            ("filter.period", self.filter.period.to_string()),
            ("request-delay.minimum_ms", self.request_delay.minimum_ms.to_string()),
            ("request-delay.rand_ms", self.request_delay.rand_ms.to_string()),
            (
                "concurrent.threads",
                if self.concurrent.is_auto() {
                    "0 (auto)".to_string()
                } else {
                    self.concurrent.threads.to_string()
                },
            ),
            (
                "concurrent.classBufferMax",
                self.concurrent.class_buffer_max.to_string(),
            ),
            ("login.user", self.login.user.clone()),
            ("login.password", redact(&self.login.password).to_string()),
            ("plans", self.plans.join(", ")),
            ("scrape.classes", self.scrape.classes.to_string()),
            ("scrape.careerPlans", self.scrape.career_plans.to_string()),
            ("beautify.prefix", self.beautify.prefix.escape_default().to_string()),
            ("beautify.indent", self.beautify.indent.escape_default().to_string()),
            ("minify", self.minify.to_string()),
            ("log.toFile", self.log.to_file.to_string()),
            ("log.level", level_name(self.log.level)),
            ("log.format", self.log.format.as_str().to_string()),
        ]
    }
}

impl From<&CrawlConfig> for RawConfig {
    /// Store view of a validated configuration. Feeding it back through the
    /// gate yields the same configuration.
    fn from(config: &CrawlConfig) -> Self {
        Self {
            filter: RawFilter {
                year: Some(i64::from(config.filter.year)),
                level: Some(config.filter.level.as_str().to_string()),
                period: Some(config.filter.period.as_str().to_string()),
            },
            request_delay: RawRequestDelay {
                minimum_ms: i64::try_from(config.request_delay.minimum_ms).ok(),
                rand_ms: i64::try_from(config.request_delay.rand_ms).ok(),
            },
            concurrent: RawConcurrent {
                threads: i64::try_from(config.concurrent.threads).ok(),
                class_buffer_max: i64::try_from(config.concurrent.class_buffer_max).ok(),
            },
            login: RawLogin {
                user: Some(config.login.user.clone()),
                password: Some(config.login.password.clone()),
            },
            plans: Some(config.plans.clone()),
            scrape: RawScrape {
                classes: Some(config.scrape.classes),
                career_plans: Some(config.scrape.career_plans),
            },
            beautify: RawBeautify {
                prefix: Some(config.beautify.prefix.clone()),
                indent: Some(config.beautify.indent.clone()),
            },
            minify: Some(config.minify),
            log: RawLog {
                to_file: Some(config.log.to_file),
                level: Some(level_name(config.log.level)),
                format: Some(config.log.format.as_str().to_string()),
            },
        }
    }
}
