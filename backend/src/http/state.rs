//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::{RecordSource, RepositoryResult};
use crate::db::{ReportSettings, SourceFactory, TellarConfig};
use crate::services::normalizer::Normalizer;
use crate::services::snapshot::{RecordCache, RecordSnapshot};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where raw records come from
    pub source: Arc<dyn RecordSource>,
    /// Normalized snapshot shared by every view
    pub cache: Arc<RecordCache>,
    /// Fills missing filters and durations
    pub normalizer: Arc<Normalizer>,
    /// Report paging limits
    pub reports: ReportSettings,
}

impl AppState {
    /// Create a new application state with the given record source.
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            cache: Arc::new(RecordCache::new()),
            normalizer: Arc::new(Normalizer::default()),
            reports: ReportSettings::default(),
        }
    }

    /// Build the source, normalizer and paging limits from configuration.
    pub fn from_config(config: &TellarConfig) -> RepositoryResult<Self> {
        let source = SourceFactory::from_config(config)?;
        Ok(Self::new(source)
            .with_normalizer(Normalizer::seeded(config.source.seed))
            .with_report_settings(config.reports.clone()))
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    pub fn with_report_settings(mut self, reports: ReportSettings) -> Self {
        self.reports = reports;
        self
    }

    /// Current snapshot, fetching on first use or after invalidation.
    pub async fn snapshot(&self) -> RepositoryResult<Arc<RecordSnapshot>> {
        self.cache
            .snapshot(self.source.as_ref(), &self.normalizer)
            .await
    }
}
