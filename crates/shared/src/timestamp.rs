//! ISO-8601 timestamp handling for wire payloads.
//!
//! Devices in the field do not agree on a single timestamp format. Some send
//! RFC 3339 with an explicit offset, others send naive date-times which are
//! taken to be UTC. Seconds may be omitted. Everything is emitted as RFC 3339 in UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Offset-bearing formats RFC 3339 does not cover. `%#z` also takes `Z`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Naive formats accepted when no offset is present.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid ISO-8601 timestamp: {0}")]
pub struct TimestampError(pub String);

/// Parses an ISO-8601 timestamp, treating offset-less values as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(ts.with_timezone(&Utc));
    }

    // A bare `Z` suffix means UTC.
    let naive = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError(value.to_string()))
}

/// Formats a timestamp the way it is sent over the wire.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter for `DateTime<Utc>` fields.
///
/// Use with `#[serde(with = "shared::timestamp::iso8601")]`.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
