//! Layered loading of the raw configuration.

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::UncasedStr;
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::error::ConfigError;
use crate::domain::models::RawConfig;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".sgacrawl.yaml";

/// Prefix of environment variable overrides. Nesting uses `__`, e.g.
/// `SGACRAWL_FILTER__YEAR=2021`.
pub const ENV_PREFIX: &str = "SGACRAWL_";

/// Keys whose environment values are taken verbatim instead of being parsed
/// as numbers, booleans or arrays.
const VERBATIM_KEYS: [&str; 7] = [
    "filter.level",
    "filter.period",
    "login.user",
    "login.password",
    "plans",
    "beautify.prefix",
    "beautify.indent",
];

/// Raw configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Config file that was read, if any was found
    pub source: Option<PathBuf>,
    /// Merged file and environment values
    pub raw: RawConfig,
}

/// Configuration loader with layered merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the raw configuration.
    ///
    /// Precedence (lowest to highest):
    /// 1. YAML config file (`requested`, or `~/.sgacrawl.yaml` when the
    ///    default file is missing from the working directory)
    /// 2. Environment variables (`SGACRAWL_*` prefix, highest priority)
    ///
    /// No defaults are merged: keys missing from every source stay missing
    /// so the gate can reject an empty configuration.
    pub fn load(requested: impl AsRef<Path>) -> Result<LoadedConfig, ConfigError> {
        let source = Self::resolve_path(requested.as_ref());
        match &source {
            Some(path) => tracing::debug!(path = %path.display(), "reading config file"),
            None => tracing::debug!(
                requested = %requested.as_ref().display(),
                "config file not found, using environment only"
            ),
        }
        let raw = Self::extract(source.as_deref())?;
        Ok(LoadedConfig { source, raw })
    }

    /// Find the config file to read.
    pub fn resolve_path(requested: &Path) -> Option<PathBuf> {
        if requested.is_file() {
            return Some(requested.to_path_buf());
        }
        if requested == Path::new(DEFAULT_CONFIG_FILE) {
            return dirs::home_dir()
                .map(|home| home.join(DEFAULT_CONFIG_FILE))
                .filter(|path| path.is_file());
        }
        None
    }

    /// Merge the optional file with environment overrides.
    ///
    /// Typed keys go through figment's value parsing (`SGACRAWL_FILTER__YEAR=2021`
    /// is a number). String keys keep the text exactly as set, so a password
    /// like `0123` is not read as the number 123.
    pub fn figment(file: Option<&Path>) -> Figment {
        let figment = match file {
            Some(path) => Figment::new().merge(Yaml::file_exact(path)),
            None => Figment::new(),
        };
        let figment = figment.merge(Self::env().filter(|key| !is_verbatim(key)));

        let verbatim = Self::env().filter(is_verbatim);
        let figment = verbatim.iter().fold(figment, |figment, (key, value)| {
            figment.merge(Serialized::default(key.as_str(), value))
        });
        figment
    }

    /// Extract the merged sources into a [`RawConfig`].
    pub fn extract(file: Option<&Path>) -> Result<RawConfig, ConfigError> {
        Self::figment(file).extract().map_err(ConfigError::from)
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX)
            .split("__")
            .map(|key| canonical_key(key.as_str()).into())
            .lowercase(false)
    }
}

fn is_verbatim(key: &UncasedStr) -> bool {
    VERBATIM_KEYS.iter().any(|verbatim| key == *verbatim)
}

/// Map an environment-derived key onto the spelling used in config files.
///
/// Environment variable names can't carry hyphens or camel case, so
/// `REQUEST_DELAY.MINIMUM_MS` becomes `request-delay.minimum_ms` and
/// `CONCURRENT.CLASSBUFFERMAX` becomes `concurrent.classBufferMax`.
fn canonical_key(key: &str) -> String {
    key.split('.')
        .map(|segment| {
            let segment = segment.to_ascii_lowercase();
            match segment.as_str() {
                "request_delay" => "request-delay".to_string(),
                "classbuffermax" | "class_buffer_max" => "classBufferMax".to_string(),
                "careerplans" | "career_plans" => "careerPlans".to_string(),
                "tofile" | "to_file" => "toFile".to_string(),
                _ => segment,
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}
