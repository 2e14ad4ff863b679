//! Public API surface for the TELLAR backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::DashboardTotals;
pub use crate::routes::dashboard::DemographicBucket;
pub use crate::routes::dashboard::FilterCount;
pub use crate::routes::dashboard::InteractionBucket;
pub use crate::routes::filter_performance::FilterStats;
pub use crate::routes::records::RefreshResponse;
pub use crate::routes::reports::FilterBadge;
pub use crate::routes::reports::ReportPage;
pub use crate::routes::reports::ReportTable;

pub use crate::models::FilterId;
pub use crate::models::Gender;
pub use crate::models::NormalizedRecord;
pub use crate::models::RawRecord;
pub use crate::models::ReportFilter;
