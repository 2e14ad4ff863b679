//! Timestamp handling for interaction records.
//!
//! Record sources disagree on the shape of `endTime`: the synthetic
//! generator emits RFC 3339 (`2024-05-01T10:15:00.000Z`) while the record
//! collection API emits `2024-05-01 10:15:00.000Z`. Both are accepted and
//! always interpreted in UTC so the derived calendar date does not depend on
//! the host timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse an end timestamp in any of the accepted shapes.
pub fn parse_end_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = value.trim_end_matches('Z');
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Render a timestamp the way the synthetic source emits it.
pub fn format_end_time(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar date bucket (`YYYY-MM-DD` when serialized).
pub fn date_bucket(value: &DateTime<Utc>) -> NaiveDate {
    value.date_naive()
}

/// Serde adapter for `endTime` fields.
pub mod end_time_format {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_end_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_end_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid endTime '{}'", raw)))
    }
}
