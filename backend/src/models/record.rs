//! Interaction records as delivered by a record source and after normalization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::filter::{FilterId, Gender};
use super::time::end_time_format;

/// One interaction session exactly as the record source returned it.
///
/// Every field except `id` and `endTime` may be absent; the normalizer fills
/// the gaps that matter for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub interacted: bool,
    #[serde(default)]
    pub hand_gestures: bool,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(with = "end_time_format")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub filters: Option<Vec<i64>>,
}

/// A record with a date bucket, guaranteed filters and a guaranteed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub id: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub interacted: bool,
    pub hand_gestures: bool,
    /// Seconds, finite and non-negative.
    pub duration: f64,
    #[serde(with = "end_time_format")]
    pub end_time: DateTime<Utc>,
    /// UTC calendar date of `end_time`.
    pub date: NaiveDate,
    /// Non-empty, no duplicates.
    pub filters: Vec<FilterId>,
}

impl NormalizedRecord {
    /// Age when present and positive.
    pub fn valid_age(&self) -> Option<i64> {
        self.age.filter(|age| *age > 0)
    }

    pub fn recognized_gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }

    /// A usable age and a non-blank gender string (recognized or not).
    pub fn has_demographics(&self) -> bool {
        self.valid_age().is_some()
            && self
                .gender
                .as_deref()
                .map(|g| !g.trim().is_empty())
                .unwrap_or(false)
    }

    pub fn uses_filter(&self, filter: FilterId) -> bool {
        self.filters.contains(&filter)
    }
}

impl From<&NormalizedRecord> for RawRecord {
    fn from(record: &NormalizedRecord) -> Self {
        RawRecord {
            id: record.id.clone(),
            age: record.age,
            gender: record.gender.clone(),
            interacted: record.interacted,
            hand_gestures: record.hand_gestures,
            duration: Some(record.duration),
            end_time: record.end_time,
            filters: Some(record.filters.iter().map(|f| i64::from(*f)).collect()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

// Collections store numbers as floats; a blank or null age is simply absent.
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let age = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(age)
}
