//! Loose scalar coercions for raw configuration values.
//!
//! Environment overrides and hand-written YAML mix types freely: `level: 2`
//! is a number, `SGACRAWL_MINIFY=True` may arrive as a string. These helpers
//! accept any scalar and coerce it the way the crawler always has.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarList {
    Many(Vec<Scalar>),
    One(Scalar),
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(scalar) = Option::<Scalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match scalar {
        Scalar::Int(n) => Ok(Some(n)),
        #[allow(clippy::cast_possible_truncation)]
        Scalar::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected an integer, got `{s}`"))),
        other => Err(de::Error::custom(format!(
            "expected an integer, got `{}`",
            other.into_string()
        ))),
    }
}

pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(scalar) = Option::<Scalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match scalar {
        Scalar::Bool(b) => Ok(Some(b)),
        Scalar::Int(n) => Ok(Some(n != 0)),
        Scalar::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "t" | "1" => Ok(Some(true)),
            "false" | "f" | "0" => Ok(Some(false)),
            _ => Err(de::Error::custom(format!("expected a boolean, got `{s}`"))),
        },
        Scalar::Float(f) => Err(de::Error::custom(format!(
            "expected a boolean, got `{f}`"
        ))),
    }
}

/// A list of strings, or a single string split on whitespace.
pub fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<ScalarList>::deserialize(deserializer)?.map(|list| match list {
            ScalarList::Many(items) => items.into_iter().map(Scalar::into_string).collect(),
            ScalarList::One(item) => item
                .into_string()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }),
    )
}
