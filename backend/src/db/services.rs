//! Service layer over a [`RecordSource`].
//!
//! Source failures never reach the dashboard: a failed fetch is logged and
//! treated as an empty record list.

use log::{debug, warn};

use super::repository::{RecordSource, RepositoryResult};
use crate::models::RawRecord;

/// Check whether the source is reachable.
pub async fn health_check(source: &dyn RecordSource) -> RepositoryResult<bool> {
    source.health_check().await
}

/// Fetch every record, degrading to an empty list on failure.
pub async fn fetch_records(source: &dyn RecordSource) -> Vec<RawRecord> {
    match source.fetch_all().await {
        Ok(records) => {
            debug!("Fetched {} records from {} source", records.len(), source.name());
            records
        }
        Err(e) => {
            warn!(
                "Record fetch from {} source failed, continuing with no records: {}",
                source.name(),
                e
            );
            Vec::new()
        }
    }
}
