//! Record source trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::RawRecord;

/// A read-only supplier of raw interaction records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so they can be shared through the
/// HTTP application state.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short backend name used in logs and health output.
    fn name(&self) -> &'static str;

    /// Fetch every available record, up to the source's own cap.
    ///
    /// # Returns
    /// * `Ok(Vec<RawRecord>)` - Records in source order
    /// * `Err(RepositoryError)` - If the source is unreachable or answers garbage
    async fn fetch_all(&self) -> RepositoryResult<Vec<RawRecord>>;

    /// Check whether the source is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
