//! Configuration gate.
//!
//! Single ordered pass over a [`RawConfig`]: hard failures stop the pass,
//! borderline values are repaired and reported as [`ConfigWarning`]s. Later
//! steps see the repairs of earlier ones (an empty plan list disables career
//! plan scraping before the scrape toggles are checked).

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::Level;

use crate::domain::error::ConfigError;
use crate::domain::models::{
    BeautifyConfig, ConcurrencyConfig, CrawlConfig, FilterConfig, FilterLevel, FilterPeriod,
    LogFormat, LoggingConfig, LoginConfig, RawConfig, RequestDelayConfig, ScrapeConfig,
};

/// Accepted values for `filter.year`.
pub const YEAR_RANGE: RangeInclusive<i64> = 2000..=2050;

/// Lowest `request-delay.minimum_ms` accepted as configured.
pub const MIN_REQUEST_DELAY_MS: i64 = 800;

/// Delay applied when `request-delay.minimum_ms` is below the floor.
pub const FALLBACK_REQUEST_DELAY_MS: u64 = 1000;

/// `request-delay.minimum_ms` value that skips the floor check.
pub const REQUEST_DELAY_FLOOR_BYPASS_MS: i64 = 42;

/// Plan list used when no career plans are configured.
pub const NO_PLANS_SENTINEL: &str = "none";

/// Log level used when `log.level` is missing or unrecognized.
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// A non-fatal repair made by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ConfigWarning {
    /// `minimum_ms` missing or under the floor, set to the fallback
    MinimumDelayRaised { received: Option<i64> },
    /// Negative `rand_ms` set to zero
    RandomDelayClamped { received: i64 },
    /// One or negative thread count set to auto
    ThreadsCoerced { received: i64 },
    /// User dropped for lack of a password
    UserCleared,
    /// Career plans disabled for lack of plans
    CareerPlansDisabled,
    /// Beautify strings kept despite visible characters
    BeautifyNotWhitespace { prefix: String, indent: String },
    /// `minify: false` overridden by whitespace-only beautify strings
    MinifyForced,
    /// Unknown log level replaced by `info`
    LogLevelDefaulted { received: String },
    /// Unknown log format replaced by `pretty`
    LogFormatDefaulted { received: String },
}

impl ConfigWarning {
    /// Dotted key of the repaired setting.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MinimumDelayRaised { .. } => "request-delay.minimum_ms",
            Self::RandomDelayClamped { .. } => "request-delay.rand_ms",
            Self::ThreadsCoerced { .. } => "concurrent.threads",
            Self::UserCleared => "login.user",
            Self::CareerPlansDisabled => "scrape.careerPlans",
            Self::BeautifyNotWhitespace { .. } => "beautify",
            Self::MinifyForced => "minify",
            Self::LogLevelDefaulted { .. } => "log.level",
            Self::LogFormatDefaulted { .. } => "log.format",
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimumDelayRaised { received: Some(ms) } => write!(
                f,
                "request-delay.minimum_ms too low ({ms}). setting at {FALLBACK_REQUEST_DELAY_MS} ms"
            ),
            Self::MinimumDelayRaised { received: None } => write!(
                f,
                "request-delay.minimum_ms not found in config. setting at {FALLBACK_REQUEST_DELAY_MS} ms"
            ),
            Self::RandomDelayClamped { received } => write!(
                f,
                "request-delay.rand_ms can't be negative (got {received}), setting to zero"
            ),
            Self::ThreadsCoerced { received } => write!(
                f,
                "number of threads is one or negative (got {received}), setting to zero for expected behaviour"
            ),
            Self::UserCleared => f.write_str("login.password is empty, ignoring login.user"),
            Self::CareerPlansDisabled => {
                f.write_str("no plans configured, disabling scrape.careerPlans")
            }
            Self::BeautifyNotWhitespace { prefix, indent } => write!(
                f,
                "beautify.prefix/indent seem to have non whitespace characters. this may invalidate json. got: {prefix:?}, {indent:?}"
            ),
            Self::MinifyForced => {
                f.write_str("beautify.prefix/indent are whitespace only, forcing minify")
            }
            Self::LogLevelDefaulted { received } => write!(
                f,
                "log.level {received:?} not recognized (trace, debug, info, warn, error), using info"
            ),
            Self::LogFormatDefaulted { received } => write!(
                f,
                "log.format {received:?} not recognized (pretty, json), using pretty"
            ),
        }
    }
}

/// Outcome of a successful gate pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// Canonical configuration
    pub config: CrawlConfig,
    /// Repairs made, in gate order
    pub warnings: Vec<ConfigWarning>,
}

/// Validates and normalizes crawler configuration.
pub struct ConfigGate;

impl ConfigGate {
    /// Run the gate over a raw configuration.
    ///
    /// Returns the canonical configuration plus every repair made, or the
    /// first hard failure.
    pub fn validate(raw: RawConfig) -> Result<Validated, ConfigError> {
        if raw.is_empty() {
            return Err(ConfigError::NoKeys);
        }

        let mut warnings = Vec::new();

        let year = resolve_year(raw.filter.year.unwrap_or(0))?;
        let level: FilterLevel = raw.filter.level.as_deref().unwrap_or_default().parse()?;
        let period: FilterPeriod = raw.filter.period.as_deref().unwrap_or_default().parse()?;

        let request_delay = RequestDelayConfig {
            minimum_ms: repair_minimum_delay(raw.request_delay.minimum_ms, &mut warnings),
            rand_ms: repair_random_delay(raw.request_delay.rand_ms.unwrap_or(0), &mut warnings),
        };
        let threads = repair_threads(raw.concurrent.threads.unwrap_or(0), &mut warnings);
        let class_buffer_max = resolve_class_buffer(raw.concurrent.class_buffer_max.unwrap_or(0))?;

        let login = resolve_login(
            raw.login.user.unwrap_or_default(),
            raw.login.password.unwrap_or_default(),
            &mut warnings,
        );

        let mut scrape = ScrapeConfig {
            classes: raw.scrape.classes.unwrap_or(false),
            career_plans: raw.scrape.career_plans.unwrap_or(false),
        };
        let mut plans = raw.plans.unwrap_or_default();
        if plans.is_empty() {
            plans.push(NO_PLANS_SENTINEL.to_string());
            if scrape.career_plans {
                warnings.push(ConfigWarning::CareerPlansDisabled);
            }
            scrape.career_plans = false;
        }
        if !scrape.classes && !scrape.career_plans {
            return Err(ConfigError::NothingToScrape);
        }

        let beautify = BeautifyConfig {
            prefix: unescape_whitespace(raw.beautify.prefix.as_deref().unwrap_or_default()),
            indent: unescape_whitespace(raw.beautify.indent.as_deref().unwrap_or_default()),
        };
        let mut minify = raw.minify.unwrap_or(false);
        if is_whitespace(&beautify.prefix) && is_whitespace(&beautify.indent) {
            if raw.minify == Some(false) {
                warnings.push(ConfigWarning::MinifyForced);
            }
            minify = true;
        } else {
            warnings.push(ConfigWarning::BeautifyNotWhitespace {
                prefix: beautify.prefix.clone(),
                indent: beautify.indent.clone(),
            });
        }

        let log = LoggingConfig {
            to_file: raw.log.to_file.unwrap_or(false),
            level: resolve_log_level(raw.log.level, &mut warnings),
            format: resolve_log_format(raw.log.format, &mut warnings),
        };

        Ok(Validated {
            config: CrawlConfig {
                filter: FilterConfig {
                    year,
                    level,
                    period,
                },
                request_delay,
                concurrent: ConcurrencyConfig {
                    threads,
                    class_buffer_max,
                },
                login,
                plans,
                scrape,
                beautify,
                minify,
                log,
            },
            warnings,
        })
    }
}

/// Replace literal `\n`, `\t` and `\r` escapes with the characters they name.
pub fn unescape_whitespace(s: &str) -> String {
    s.replace("\\n", "\n").replace("\\t", "\t").replace("\\r", "\r")
}

fn is_whitespace(s: &str) -> bool {
    s.trim().is_empty()
}

fn resolve_year(year: i64) -> Result<u16, ConfigError> {
    if !YEAR_RANGE.contains(&year) {
        return Err(ConfigError::InvalidYear(year));
    }
    u16::try_from(year).map_err(|_| ConfigError::InvalidYear(year))
}

fn repair_minimum_delay(configured: Option<i64>, warnings: &mut Vec<ConfigWarning>) -> u64 {
    let value = configured.unwrap_or(0);
    if value == REQUEST_DELAY_FLOOR_BYPASS_MS || value >= MIN_REQUEST_DELAY_MS {
        return value.unsigned_abs();
    }
    warnings.push(ConfigWarning::MinimumDelayRaised {
        received: configured,
    });
    FALLBACK_REQUEST_DELAY_MS
}

fn repair_random_delay(value: i64, warnings: &mut Vec<ConfigWarning>) -> u64 {
    if value < 0 {
        warnings.push(ConfigWarning::RandomDelayClamped { received: value });
        return 0;
    }
    value.unsigned_abs()
}

fn repair_threads(value: i64, warnings: &mut Vec<ConfigWarning>) -> usize {
    if value < 2 && value != 0 {
        warnings.push(ConfigWarning::ThreadsCoerced { received: value });
        return 0;
    }
    usize::try_from(value).unwrap_or(0)
}

fn resolve_class_buffer(value: i64) -> Result<usize, ConfigError> {
    if value < 1 {
        return Err(ConfigError::InvalidClassBufferMax(value));
    }
    usize::try_from(value).map_err(|_| ConfigError::InvalidClassBufferMax(value))
}

fn resolve_login(user: String, password: String, warnings: &mut Vec<ConfigWarning>) -> LoginConfig {
    if password.is_empty() {
        if !user.is_empty() {
            warnings.push(ConfigWarning::UserCleared);
        }
        return LoginConfig {
            user: String::new(),
            password,
        };
    }
    LoginConfig { user, password }
}

fn resolve_log_level(configured: Option<String>, warnings: &mut Vec<ConfigWarning>) -> Level {
    let Some(received) = configured else {
        return DEFAULT_LOG_LEVEL;
    };
    received.trim().parse().unwrap_or_else(|_| {
        warnings.push(ConfigWarning::LogLevelDefaulted { received });
        DEFAULT_LOG_LEVEL
    })
}

fn resolve_log_format(configured: Option<String>, warnings: &mut Vec<ConfigWarning>) -> LogFormat {
    let Some(received) = configured else {
        return LogFormat::default();
    };
    received.trim().parse().unwrap_or_else(|_| {
        warnings.push(ConfigWarning::LogFormatDefaulted { received });
        LogFormat::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;
    use crate::domain::models::{RawConcurrent, RawFilter, RawScrape};

    /// Smallest raw configuration the gate accepts.
    fn minimal() -> RawConfig {
        RawConfig {
            filter: RawFilter {
                year: Some(2021),
                level: Some("grado".to_string()),
                period: Some("sem1".to_string()),
            },
            concurrent: RawConcurrent {
                threads: None,
                class_buffer_max: Some(10),
            },
            scrape: RawScrape {
                classes: Some(true),
                career_plans: None,
            },
            ..Default::default()
        }
    }

    fn validate(raw: RawConfig) -> Validated {
        ConfigGate::validate(raw).expect("config should pass the gate")
    }

    #[test]
    fn test_empty_store_rejected() {
        let err = ConfigGate::validate(RawConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoKeys));
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.to_string(), "no keys found in file");
    }

    #[test]
    fn test_minimal_config_defaults() {
        let validated = validate(minimal());
        let config = validated.config;

        assert_eq!(config.filter.year, 2021);
        assert_eq!(config.filter.level, FilterLevel::Grado);
        assert_eq!(config.filter.period, FilterPeriod::Semester1);
        assert_eq!(config.request_delay.minimum_ms, FALLBACK_REQUEST_DELAY_MS);
        assert_eq!(config.request_delay.rand_ms, 0);
        assert!(config.concurrent.is_auto());
        assert_eq!(config.plans, vec![NO_PLANS_SENTINEL.to_string()]);
        assert!(!config.scrape.career_plans);
        assert!(config.minify);
        assert_eq!(config.log.level, Level::INFO);
        assert_eq!(config.log.format, LogFormat::Pretty);

        assert_eq!(
            validated.warnings,
            vec![ConfigWarning::MinimumDelayRaised { received: None }]
        );
    }

    #[test]
    fn test_missing_year_reads_as_zero() {
        let mut raw = minimal();
        raw.filter.year = None;
        assert!(matches!(
            ConfigGate::validate(raw).unwrap_err(),
            ConfigError::InvalidYear(0)
        ));
    }

    #[test]
    fn test_year_bounds() {
        for (year, ok) in [(1999, false), (2000, true), (2050, true), (2051, false)] {
            let mut raw = minimal();
            raw.filter.year = Some(year);
            assert_eq!(ConfigGate::validate(raw).is_ok(), ok, "year {year}");
        }
    }

    #[test]
    fn test_year_checked_before_level() {
        let mut raw = minimal();
        raw.filter.year = Some(1990);
        raw.filter.level = Some("bogus".to_string());
        assert!(matches!(
            ConfigGate::validate(raw).unwrap_err(),
            ConfigError::InvalidYear(1990)
        ));
    }

    #[test]
    fn test_missing_level_passes_through() {
        let mut raw = minimal();
        raw.filter.level = None;
        assert_eq!(validate(raw).config.filter.level, FilterLevel::Unspecified);
    }

    #[test]
    fn test_missing_period_rejected() {
        let mut raw = minimal();
        raw.filter.period = None;
        match ConfigGate::validate(raw).unwrap_err() {
            ConfigError::InvalidFilterPeriod(got) => assert!(got.is_empty()),
            other => panic!("Expected InvalidFilterPeriod, got {other:?}"),
        }
    }

    #[test]
    fn test_minimum_delay_policy() {
        for (input, expected, warned) in [
            (42, 42, false),
            (0, 1000, true),
            (799, 1000, true),
            (-10, 1000, true),
            (800, 800, false),
            (2500, 2500, false),
        ] {
            let mut raw = minimal();
            raw.request_delay.minimum_ms = Some(input);
            let validated = validate(raw);
            assert_eq!(validated.config.request_delay.minimum_ms, expected, "input {input}");
            assert_eq!(
                validated.warnings.contains(&ConfigWarning::MinimumDelayRaised {
                    received: Some(input)
                }),
                warned,
                "input {input}"
            );
        }
    }

    #[test]
    fn test_random_delay_clamped() {
        let mut raw = minimal();
        raw.request_delay.rand_ms = Some(-5);
        let validated = validate(raw);
        assert_eq!(validated.config.request_delay.rand_ms, 0);
        assert!(validated
            .warnings
            .contains(&ConfigWarning::RandomDelayClamped { received: -5 }));

        let mut raw = minimal();
        raw.request_delay.rand_ms = Some(5);
        assert_eq!(validate(raw).config.request_delay.rand_ms, 5);
    }

    #[test]
    fn test_threads_policy() {
        for (input, expected) in [(1, 0), (-3, 0), (0, 0), (2, 2), (4, 4)] {
            let mut raw = minimal();
            raw.concurrent.threads = Some(input);
            assert_eq!(validate(raw).config.concurrent.threads, expected, "input {input}");
        }
    }

    #[test]
    fn test_class_buffer_minimum() {
        let mut raw = minimal();
        raw.concurrent.class_buffer_max = Some(0);
        let err = ConfigGate::validate(raw).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidClassBufferMax(0)));
        assert_eq!(err.kind(), ErrorKind::Range);

        let mut raw = minimal();
        raw.concurrent.class_buffer_max = None;
        assert!(ConfigGate::validate(raw).is_err());

        let mut raw = minimal();
        raw.concurrent.class_buffer_max = Some(1);
        assert_eq!(validate(raw).config.concurrent.class_buffer_max, 1);
    }

    #[test]
    fn test_user_cleared_without_password() {
        let mut raw = minimal();
        raw.login.user = Some("alice".to_string());
        raw.login.password = Some(String::new());
        let validated = validate(raw);
        assert_eq!(validated.config.login.user, "");
        assert!(validated.warnings.contains(&ConfigWarning::UserCleared));

        let mut raw = minimal();
        raw.login.user = Some("alice".to_string());
        raw.login.password = Some("secret".to_string());
        let config = validate(raw).config;
        assert_eq!(config.login.user, "alice");
        assert!(config.login.has_credentials());
    }

    #[test]
    fn test_empty_plans_disable_career_plans() {
        let mut raw = minimal();
        raw.plans = Some(vec![]);
        raw.scrape.career_plans = Some(true);
        let validated = validate(raw);
        assert_eq!(validated.config.plans, vec!["none".to_string()]);
        assert!(!validated.config.scrape.career_plans);
        assert!(validated.warnings.contains(&ConfigWarning::CareerPlansDisabled));
    }

    #[test]
    fn test_plans_kept_when_present() {
        let mut raw = minimal();
        raw.plans = Some(vec!["S10-Rev.18".to_string()]);
        raw.scrape.career_plans = Some(true);
        let config = validate(raw).config;
        assert_eq!(config.plans, vec!["S10-Rev.18".to_string()]);
        assert!(config.scrape.career_plans);
    }

    #[test]
    fn test_both_scrape_toggles_off_rejected() {
        let mut raw = minimal();
        raw.scrape.classes = Some(false);
        raw.scrape.career_plans = Some(false);
        let err = ConfigGate::validate(raw).unwrap_err();
        assert!(matches!(err, ConfigError::NothingToScrape));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_career_plans_only_needs_plans() {
        let mut raw = minimal();
        raw.scrape.classes = Some(false);
        raw.scrape.career_plans = Some(true);
        assert!(matches!(
            ConfigGate::validate(raw).unwrap_err(),
            ConfigError::NothingToScrape
        ));
    }

    #[test]
    fn test_unescape_whitespace() {
        assert_eq!(unescape_whitespace("\\t"), "\t");
        assert_eq!(unescape_whitespace("\\r\\n"), "\r\n");
        assert_eq!(unescape_whitespace("  "), "  ");
        assert_eq!(unescape_whitespace("a\\tb"), "a\tb");
    }

    #[test]
    fn test_beautify_whitespace_forces_minify() {
        let mut raw = minimal();
        raw.beautify.prefix = Some("\\t".to_string());
        raw.beautify.indent = Some("\\n".to_string());
        raw.minify = Some(false);
        let validated = validate(raw);
        assert_eq!(validated.config.beautify.prefix, "\t");
        assert_eq!(validated.config.beautify.indent, "\n");
        assert!(validated.config.minify);
        assert!(validated.warnings.contains(&ConfigWarning::MinifyForced));
    }

    #[test]
    fn test_beautify_non_whitespace_warns_but_passes() {
        let mut raw = minimal();
        raw.beautify.prefix = Some("//".to_string());
        raw.beautify.indent = Some("\\t".to_string());
        raw.minify = Some(false);
        let validated = validate(raw);
        assert_eq!(validated.config.beautify.prefix, "//");
        assert!(!validated.config.minify);
        assert!(validated.warnings.contains(&ConfigWarning::BeautifyNotWhitespace {
            prefix: "//".to_string(),
            indent: "\t".to_string(),
        }));
    }

    #[test]
    fn test_log_settings_parsed() {
        let mut raw = minimal();
        raw.log.level = Some("DEBUG".to_string());
        raw.log.format = Some("json".to_string());
        let validated = validate(raw);
        assert_eq!(validated.config.log.level, Level::DEBUG);
        assert_eq!(validated.config.log.format, LogFormat::Json);
        assert!(!validated
            .warnings
            .iter()
            .any(|w| w.field().starts_with("log.")));
    }

    #[test]
    fn test_unknown_log_settings_fall_back() {
        let mut raw = minimal();
        raw.log.level = Some("warning".to_string());
        raw.log.format = Some("xml".to_string());
        let validated = validate(raw);
        assert_eq!(validated.config.log.level, Level::INFO);
        assert_eq!(validated.config.log.format, LogFormat::Pretty);
        assert!(validated.warnings.contains(&ConfigWarning::LogLevelDefaulted {
            received: "warning".to_string()
        }));
        assert!(validated.warnings.contains(&ConfigWarning::LogFormatDefaulted {
            received: "xml".to_string()
        }));
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut raw = minimal();
        raw.filter.level = Some("PICHIS".to_string());
        raw.filter.period = Some("Segundo Cuat.".to_string());
        raw.request_delay.minimum_ms = Some(10);
        raw.request_delay.rand_ms = Some(-1);
        raw.concurrent.threads = Some(1);
        raw.login.user = Some("alice".to_string());
        raw.beautify.indent = Some("\\t".to_string());
        raw.log.level = Some("loud".to_string());

        let first = validate(raw);
        assert!(!first.warnings.is_empty());

        let second = validate(RawConfig::from(&first.config));
        assert_eq!(second.config, first.config);
        assert!(second.warnings.is_empty(), "{:?}", second.warnings);
    }

    #[test]
    fn test_warning_fields() {
        assert_eq!(
            ConfigWarning::ThreadsCoerced { received: 1 }.field(),
            "concurrent.threads"
        );
        assert!(ConfigWarning::MinimumDelayRaised { received: Some(5) }
            .to_string()
            .contains("too low (5)"));
    }
}
