pub mod dashboard;
pub mod filter_performance;
pub mod records;
pub mod reports;
