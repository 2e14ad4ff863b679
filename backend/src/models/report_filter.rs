//! The closed set of report view filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter::{FilterId, Gender};
use super::record::NormalizedRecord;

/// Age boundary used by the two age filters: `> 25` and `<= 25`.
const REPORT_AGE_THRESHOLD: i64 = 25;

/// A report filter control. Serialized as its query key (`all`, `filter_2`, ...).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportFilter {
    #[default]
    All,
    Interacted,
    NotInteracted,
    Male,
    Female,
    AgeAbove25,
    AgeAtMost25,
    UsesFilter(FilterId),
}

impl ReportFilter {
    /// Every control, in the order the report page shows them.
    pub const ALL: [ReportFilter; 11] = [
        ReportFilter::All,
        ReportFilter::Interacted,
        ReportFilter::NotInteracted,
        ReportFilter::Male,
        ReportFilter::Female,
        ReportFilter::AgeAbove25,
        ReportFilter::AgeAtMost25,
        ReportFilter::UsesFilter(FilterId::ONE),
        ReportFilter::UsesFilter(FilterId::TWO),
        ReportFilter::UsesFilter(FilterId::THREE),
        ReportFilter::UsesFilter(FilterId::FOUR),
    ];

    pub fn key(&self) -> String {
        match self {
            ReportFilter::All => "all".to_string(),
            ReportFilter::Interacted => "interacted".to_string(),
            ReportFilter::NotInteracted => "not_interacted".to_string(),
            ReportFilter::Male => "male".to_string(),
            ReportFilter::Female => "female".to_string(),
            ReportFilter::AgeAbove25 => "age_above_25".to_string(),
            ReportFilter::AgeAtMost25 => "age_below_or_equal_25".to_string(),
            ReportFilter::UsesFilter(id) => format!("filter_{}", id),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ReportFilter::All => "All".to_string(),
            ReportFilter::Interacted => "Interacted".to_string(),
            ReportFilter::NotInteracted => "Not Interacted".to_string(),
            ReportFilter::Male => "Male".to_string(),
            ReportFilter::Female => "Female".to_string(),
            ReportFilter::AgeAbove25 => "Age > 25".to_string(),
            ReportFilter::AgeAtMost25 => "Age ≤ 25".to_string(),
            ReportFilter::UsesFilter(id) => id.label(),
        }
    }

    /// Age filters only match records with a positive age.
    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        match self {
            ReportFilter::All => true,
            ReportFilter::Interacted => record.interacted,
            ReportFilter::NotInteracted => !record.interacted,
            ReportFilter::Male => record.recognized_gender() == Some(Gender::Male),
            ReportFilter::Female => record.recognized_gender() == Some(Gender::Female),
            ReportFilter::AgeAbove25 => record
                .valid_age()
                .map(|age| age > REPORT_AGE_THRESHOLD)
                .unwrap_or(false),
            ReportFilter::AgeAtMost25 => record
                .valid_age()
                .map(|age| age <= REPORT_AGE_THRESHOLD)
                .unwrap_or(false),
            ReportFilter::UsesFilter(id) => record.uses_filter(*id),
        }
    }
}

impl fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for ReportFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let filter = match key.as_str() {
            "all" => ReportFilter::All,
            "interacted" => ReportFilter::Interacted,
            "not_interacted" => ReportFilter::NotInteracted,
            "male" => ReportFilter::Male,
            "female" => ReportFilter::Female,
            // Short keys kept for links created by older front ends.
            "age_above_25" | "age_above" => ReportFilter::AgeAbove25,
            "age_below_or_equal_25" | "age_below" => ReportFilter::AgeAtMost25,
            other => other
                .strip_prefix("filter_")
                .and_then(|n| n.parse::<i64>().ok())
                .and_then(FilterId::new)
                .map(ReportFilter::UsesFilter)
                .ok_or_else(|| format!("Unknown report filter: {}", s))?,
        };
        Ok(filter)
    }
}

impl TryFrom<String> for ReportFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportFilter> for String {
    fn from(filter: ReportFilter) -> Self {
        filter.key()
    }
}
