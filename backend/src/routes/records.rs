use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a freshly fetched snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub records: usize,
    pub fingerprint: String,
    pub fetched_at: DateTime<Utc>,
}

pub const POST_REFRESH_RECORDS: &str = "/records/refresh";
