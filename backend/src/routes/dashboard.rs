use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::FilterId;

// =========================================================
// Dashboard types + routes
// =========================================================

/// Bar chart row: interacted visitors on one date, split by age and gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicBucket {
    pub date: NaiveDate,
    pub over25_male: usize,
    pub under25_male: usize,
    pub over25_female: usize,
    pub under25_female: usize,
}

impl DemographicBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            over25_male: 0,
            under25_male: 0,
            over25_female: 0,
            under25_female: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.over25_male + self.under25_male + self.over25_female + self.under25_female
    }
}

/// Pie chart slice: how many interacted visitors used a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCount {
    pub filter: FilterId,
    pub label: String,
    pub count: usize,
}

/// Area chart point: interacted vs. not interacted visitors on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionBucket {
    pub date: NaiveDate,
    pub interacted: usize,
    pub not_interacted: usize,
}

/// Headline numbers shown next to the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_records: usize,
    pub interacted: usize,
    pub not_interacted: usize,
    pub hand_gestures: usize,
    /// Mean duration in seconds, two decimals; 0 without records.
    pub average_duration: f64,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub demographics: Vec<DemographicBucket>,
    pub filter_popularity: Vec<FilterCount>,
    pub interactions: Vec<InteractionBucket>,
    pub totals: DashboardTotals,
}

pub const GET_DASHBOARD: &str = "/dashboard";
pub const GET_DEMOGRAPHICS: &str = "/dashboard/demographics";
pub const GET_FILTER_POPULARITY: &str = "/dashboard/filters";
pub const GET_INTERACTIONS: &str = "/dashboard/interactions";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_total() {
        let mut bucket = DemographicBucket::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bucket.total(), 0);
        bucket.over25_male = 2;
        bucket.under25_female = 3;
        assert_eq!(bucket.total(), 5);
    }

    #[test]
    fn test_bucket_serializes_iso_date() {
        let bucket = DemographicBucket::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let value = serde_json::to_value(&bucket).unwrap();
        assert_eq!(value["date"], "2024-01-02");
        assert_eq!(value["over25_male"], 0);
    }

    #[test]
    fn test_const_values() {
        assert_eq!(GET_DASHBOARD, "/dashboard");
        assert!(GET_DEMOGRAPHICS.starts_with(GET_DASHBOARD));
        assert!(GET_FILTER_POPULARITY.starts_with(GET_DASHBOARD));
        assert!(GET_INTERACTIONS.starts_with(GET_DASHBOARD));
    }
}
