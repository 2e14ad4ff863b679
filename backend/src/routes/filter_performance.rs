use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::FilterId;

/// Gallery card and modal numbers for one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    pub filter: FilterId,
    pub label: String,
    pub total_users: usize,
    /// Seconds, two decimals; 0 when nobody used the filter.
    pub average_duration: f64,
    pub interacted: usize,
    pub not_interacted: usize,
    pub male: usize,
    pub female: usize,
    /// Distinct usage dates, ascending.
    pub dates: Vec<NaiveDate>,
}

pub const LIST_FILTERS: &str = "/filters";
pub const GET_FILTER_STATS: &str = "/filters/{filter_id}";
