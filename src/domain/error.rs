//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating the crawler configuration.
///
/// Every variant is terminal: a rejected configuration can only be fixed by
/// editing the config file or the environment.
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no keys found in file")]
    NoKeys,

    #[error("bad year! should be an integer between 2000 and 2050, managed to read: {0}")]
    InvalidYear(i64),

    #[error("bad filter.level in config. got {0}")]
    InvalidFilterLevel(String),

    #[error("bad filter.period in config. got {0}")]
    InvalidFilterPeriod(String),

    #[error("concurrent.classBufferMax too low or not found. Must be at least 1, got {0}")]
    InvalidClassBufferMax(i64),

    #[error("both scrape.classes and scrape.careerPlans can't be false. no work to do")]
    NothingToScrape,

    #[error("failed to read configuration: {0}")]
    Source(Box<figment::Error>),
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to validate at all.
    Structural,
    /// A number outside its allowed bounds.
    Range,
    /// A string that matches no known value.
    Enumeration,
    /// Toggles that cannot hold together.
    Conflict,
    /// The layered sources could not be read or extracted.
    Source,
}

impl ConfigError {
    /// Which class of failure this is.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoKeys => ErrorKind::Structural,
            Self::InvalidYear(_) | Self::InvalidClassBufferMax(_) => ErrorKind::Range,
            Self::InvalidFilterLevel(_) | Self::InvalidFilterPeriod(_) => ErrorKind::Enumeration,
            Self::NothingToScrape => ErrorKind::Conflict,
            Self::Source(_) => ErrorKind::Source,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Source(Box::new(err))
    }
}
