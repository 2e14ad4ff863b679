//! Cached, normalized record snapshot.
//!
//! One fetch feeds every view until the cache is invalidated. The cache is
//! owned by whoever builds it (the HTTP state, a test) rather than living in
//! a process-wide static.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;

use crate::db::repository::{RecordSource, RepositoryResult};
use crate::db::{fetch_records, snapshot_fingerprint};
use crate::models::NormalizedRecord;
use crate::services::normalizer::Normalizer;
use crate::services::reports::sort_for_report;

/// Normalized records from one fetch, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSnapshot {
    pub records: Vec<NormalizedRecord>,
    pub fetched_at: DateTime<Utc>,
    /// Hex SHA-256 of the serialized records.
    pub fingerprint: String,
}

impl RecordSnapshot {
    pub fn build(mut records: Vec<NormalizedRecord>) -> RepositoryResult<Self> {
        sort_for_report(&mut records);
        let fingerprint = snapshot_fingerprint(&records)?;
        Ok(Self {
            records,
            fetched_at: Utc::now(),
            fingerprint,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Default)]
pub struct RecordCache {
    current: RwLock<Option<Arc<RecordSnapshot>>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, or a fresh one fetched from `source`.
    ///
    /// Concurrent misses may each fetch; the last one to finish wins.
    pub async fn snapshot(
        &self,
        source: &dyn RecordSource,
        normalizer: &Normalizer,
    ) -> RepositoryResult<Arc<RecordSnapshot>> {
        if let Some(snapshot) = self.cached() {
            debug!("Record cache hit ({} records)", snapshot.len());
            return Ok(snapshot);
        }
        self.refresh(source, normalizer).await
    }

    /// Fetch, normalize and store a new snapshot unconditionally.
    pub async fn refresh(
        &self,
        source: &dyn RecordSource,
        normalizer: &Normalizer,
    ) -> RepositoryResult<Arc<RecordSnapshot>> {
        let raw = fetch_records(source).await;
        let snapshot = Arc::new(RecordSnapshot::build(normalizer.normalize(&raw))?);
        debug!(
            "Cached snapshot {} with {} records",
            snapshot.fingerprint,
            snapshot.len()
        );
        *self.current.write() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn cached(&self) -> Option<Arc<RecordSnapshot>> {
        self.current.read().clone()
    }

    pub fn invalidate(&self) {
        *self.current.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::{parse_end_time, RawRecord};

    fn raw(id: &str, end_time: &str) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            age: Some(30),
            gender: Some("Male".to_string()),
            interacted: true,
            hand_gestures: false,
            duration: Some(100.0),
            end_time: parse_end_time(end_time).unwrap(),
            filters: Some(vec![1]),
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted_and_cached() {
        let repo = LocalRepository::with_records(vec![
            raw("old", "2024-05-01T10:00:00Z"),
            raw("new", "2024-05-03T10:00:00Z"),
        ]);
        let cache = RecordCache::new();
        let normalizer = Normalizer::seeded(Some(1));

        let first = cache.snapshot(&repo, &normalizer).await.unwrap();
        assert_eq!(first.records[0].id, "new");
        assert_eq!(first.fingerprint.len(), 64);

        repo.insert(raw("newest", "2024-05-04T10:00:00Z"));
        let second = cache.snapshot(&repo, &normalizer).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let repo = LocalRepository::with_records(vec![raw("a", "2024-05-01T10:00:00Z")]);
        let cache = RecordCache::new();
        let normalizer = Normalizer::seeded(Some(1));

        let first = cache.snapshot(&repo, &normalizer).await.unwrap();
        repo.insert(raw("b", "2024-05-02T10:00:00Z"));
        cache.invalidate();
        assert!(cache.cached().is_none());

        let second = cache.snapshot(&repo, &normalizer).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_ne!(first.fingerprint, second.fingerprint);
    }

    #[tokio::test]
    async fn test_unreachable_source_gives_empty_snapshot() {
        let repo = LocalRepository::with_records(vec![raw("a", "2024-05-01T10:00:00Z")]);
        repo.set_healthy(false);
        let cache = RecordCache::new();

        let snapshot = cache.snapshot(&repo, &Normalizer::default()).await.unwrap();
        assert!(snapshot.is_empty());
    }
}
