//! Serde adapter for optional timestamps as sent by the storage API.
//!
//! Timestamps are written as RFC 3339 strings in UTC with millisecond
//! precision. On input, RFC 3339 strings with any offset and integer epoch
//! milliseconds are accepted; `null` and blank strings mean "no timestamp".
//!
//! Use with `#[serde(with = "crate::timestamp")]` on `Option<SystemTime>`
//! fields.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};
use std::time::SystemTime;

#[derive(Deserialize)]
#[serde(untagged)]
enum Wire {
    Text(String),
    Millis(i64),
}

/// Format a timestamp the way it is sent over the wire.
pub fn to_rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp.
pub fn parse_rfc3339(text: &str) -> Result<SystemTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text.trim()).map(SystemTime::from)
}

pub fn serialize<S: Serializer>(value: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(time) => serializer.serialize_some(&to_rfc3339(*time)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SystemTime>, D::Error> {
    match Option::<Wire>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Wire::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Wire::Text(text)) => parse_rfc3339(&text)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", text, e))),
        Some(Wire::Millis(millis)) => DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| Some(SystemTime::from(dt)))
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", millis))),
    }
}
