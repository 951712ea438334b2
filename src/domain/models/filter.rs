//! Canonical crawl filters.
//!
//! Users write levels and periods in free text, in Spanish or English, in any
//! case. Both enums parse every accepted synonym and render back to a single
//! canonical spelling, so parsing a canonical value is a no-op.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// Academic program tier(s) to crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterLevel {
    /// Every tier
    All,
    /// Undergraduate
    Grado,
    /// Entry courses
    Ingreso,
    /// Postgraduate
    Posgrado,
    /// Executive education
    EducacionEjecutiva,
    /// Raw numeric level code, forwarded untouched.
    Code(LevelCode),
    /// Empty level, forwarded untouched.
    Unspecified,
}

/// Numeric level code in `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelCode(u8);

const LEVEL_CODES: [&str; 4] = ["0", "1", "2", "3"];

impl LevelCode {
    /// The numeric code.
    pub const fn get(self) -> u8 {
        self.0
    }

    fn as_str(self) -> &'static str {
        LEVEL_CODES[usize::from(self.0)]
    }
}

impl FilterLevel {
    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Grado => "grado",
            Self::Ingreso => "ingreso",
            Self::Posgrado => "posgrado",
            Self::EducacionEjecutiva => "ee",
            Self::Code(code) => code.as_str(),
            Self::Unspecified => "",
        }
    }
}

impl FromStr for FilterLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_lowercase().as_str() {
            "todos" | "all" => Self::All,
            "grado" | "grad" => Self::Grado,
            "ingreso" | "ing" | "pichis" => Self::Ingreso,
            "posgrado" | "pos" => Self::Posgrado,
            "ee" => Self::EducacionEjecutiva,
            "" => Self::Unspecified,
            other => match LEVEL_CODES.iter().position(|code| *code == other) {
                #[allow(clippy::cast_possible_truncation)]
                Some(index) => Self::Code(LevelCode(index as u8)),
                None => return Err(ConfigError::InvalidFilterLevel(s.to_string())),
            },
        };
        Ok(level)
    }
}

impl fmt::Display for FilterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Academic term(s) to crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterPeriod {
    /// First semester
    Semester1,
    /// Second semester
    Semester2,
    /// Every term
    All,
    /// Summer term
    Summer,
    /// Special term
    Special,
}

impl FilterPeriod {
    /// Canonical spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Semester1 => "sem1",
            Self::Semester2 => "sem2",
            Self::All => "all",
            Self::Summer => "summer",
            Self::Special => "special",
        }
    }
}

impl FromStr for FilterPeriod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sem2" | "cuat2" | "segundo cuat." | "2" => Ok(Self::Semester2),
            "sem1" | "cuat1" | "primer cuat." | "1" => Ok(Self::Semester1),
            "all" | "todos" => Ok(Self::All),
            "summer" | "verano" => Ok(Self::Summer),
            "special" | "especial" => Ok(Self::Special),
            _ => Err(ConfigError::InvalidFilterPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for FilterPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
