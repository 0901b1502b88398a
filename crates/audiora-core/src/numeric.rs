//! Numeric parsing at the data boundary.
//!
//! Stored sessions carry thresholds and impedance readings as whatever the
//! form produced: numbers, numeric strings, empty strings or `null`. These
//! are parsed exactly once here so everything downstream works on
//! `Option<f64>` / `f64`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Parse a threshold entry. Blank, non-numeric and non-finite text is `None`.
pub fn parse_threshold(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Serde helper for threshold fields: accepts a number, a numeric string,
/// an empty string or `null`.
pub fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Reading>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.as_f64()))
}

/// Serde helper for reading fields: `null` becomes `fallback()`.
pub fn deserialize_reading_or<'de, D>(
    deserializer: D,
    fallback: impl FnOnce() -> Reading,
) -> Result<Reading, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Reading>::deserialize(deserializer)?.unwrap_or_else(fallback))
}

/// Serde helper for reading fields: `null` becomes a blank reading.
pub fn deserialize_reading<'de, D>(deserializer: D) -> Result<Reading, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_reading_or(deserializer, Reading::default)
}

/// A raw measurement as typed into a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl Reading {
    /// The numeric value, if the reading holds a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Reading::Number(v) if v.is_finite() => Some(*v),
            Reading::Number(_) => None,
            Reading::Text(s) => parse_threshold(s),
        }
    }

    /// Numeric value with anything unparseable coerced to zero.
    pub fn coerce(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Reading::Text(s) if s.trim().is_empty())
    }
}

impl Default for Reading {
    fn default() -> Self {
        Reading::Text(String::new())
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::Number(value)
    }
}

impl From<&str> for Reading {
    fn from(value: &str) -> Self {
        Reading::Text(value.to_string())
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(v) => write!(f, "{v}"),
            Reading::Text(s) => f.write_str(s),
        }
    }
}
