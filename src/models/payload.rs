//! Payload coercion helpers
//!
//! The remote API stores everything as loosely typed JSON: numbers may arrive
//! as strings, ids as numbers, and missing fields as null. These helpers turn
//! that into typed values with the same defaults the web client used.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Errors converting a raw record into a typed entity
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Unknown exercise type: {0}")]
    UnknownExerciseType(String),

    #[error("Unknown exercise name: {0}")]
    UnknownExerciseName(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Coerce a JSON value to a number: numbers pass through, numeric strings are
/// parsed, anything else (null, junk, NaN) becomes 0.
pub fn coerce_f64(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Coerce a JSON value to a string; numbers are rendered, null becomes empty
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(&value))
}

/// Parse the date formats the API is known to emit.
///
/// Accepts RFC 3339 (`2025-01-09T08:30:00.000Z`), SQL datetimes
/// (`2025-01-09 08:30:00`), naive ISO datetimes and plain dates (midnight UTC).
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, PayloadError> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(PayloadError::InvalidDate(s.to_string()))
}

/// Render a date the way the web client did (`toISOString`)
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn date_from_payload<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub fn date_to_payload<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(date))
}
