//! In-memory record source for tests and offline development.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;

use crate::db::repository::{ErrorContext, RecordSource, RepositoryError, RepositoryResult};
use crate::models::RawRecord;

/// Record source backed by a `Vec` behind a lock.
///
/// Marking the repository unhealthy makes every fetch fail with a connection
/// error, which is how tests exercise the degraded-source path.
pub struct LocalRepository {
    records: RwLock<Vec<RawRecord>>,
    healthy: RwLock<bool>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            healthy: RwLock::new(true),
        }
    }

    /// Load a JSON array of raw records, or a `{ "items": [...] }` page.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let context = ErrorContext::new("load_json").with_source("local");

        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::connection_with_context(
                format!("Failed to read {}: {}", path.display(), e),
                context.clone(),
            )
        })?;

        let records = parse_records_json(&content).map_err(|e| {
            RepositoryError::validation_with_context(
                format!("Failed to parse {}: {}", path.display(), e),
                context,
            )
        })?;

        debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self::with_records(records))
    }

    pub fn insert(&self, record: RawRecord) {
        self.records.write().push(record);
    }

    pub fn extend<I: IntoIterator<Item = RawRecord>>(&self, records: I) {
        self.records.write().extend(records);
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }

    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }

    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.write() = healthy;
    }

    fn is_healthy(&self) -> bool {
        *self.healthy.read()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_records_json(content: &str) -> Result<Vec<RawRecord>, serde_json::Error> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List(Vec<RawRecord>),
        Page { items: Vec<RawRecord> },
    }

    Ok(match serde_json::from_str::<Payload>(content)? {
        Payload::List(records) => records,
        Payload::Page { items } => items,
    })
}

#[async_trait]
impl RecordSource for LocalRepository {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn fetch_all(&self) -> RepositoryResult<Vec<RawRecord>> {
        if !self.is_healthy() {
            return Err(RepositoryError::connection_with_context(
                "Local repository is marked unhealthy",
                ErrorContext::new("fetch_all").with_source("local"),
            ));
        }
        Ok(self.records.read().clone())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.is_healthy())
    }
}
