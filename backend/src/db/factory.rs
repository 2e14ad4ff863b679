//! Record source factory for dependency injection.
//!
//! This module provides utilities for creating record source instances based
//! on runtime configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repo_config::TellarConfig;
#[cfg(feature = "pocketbase-source")]
use super::repositories::{PocketBaseConfig, PocketBaseSource};
use super::repositories::{LocalRepository, SyntheticSource};
use super::repository::{RecordSource, RepositoryError, RepositoryResult};

/// Record source type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// In-memory records, optionally loaded from a JSON file
    Local,
    /// Seeded demo data
    Synthetic,
    /// Remote PocketBase collection
    PocketBase,
}

impl FromStr for SourceType {
    type Err = String;

    /// Parse source type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "synthetic", "pocketbase")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "synthetic" | "fake" => Ok(Self::Synthetic),
            "pocketbase" | "pb" => Ok(Self::PocketBase),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceType::Local => "local",
            SourceType::Synthetic => "synthetic",
            SourceType::PocketBase => "pocketbase",
        };
        f.write_str(name)
    }
}

/// Record source factory.
///
/// # Example
/// ```ignore
/// use tellar::db::{SourceFactory, TellarConfig};
///
/// let config = TellarConfig::load()?;
/// let source = SourceFactory::from_config(&config)?;
/// let records = tellar::db::fetch_records(source.as_ref()).await;
/// ```
pub struct SourceFactory;

impl SourceFactory {
    /// Create a record source of the given type.
    ///
    /// # Arguments
    /// * `source_type` - Type of source to create
    /// * `config` - Settings for the chosen source
    pub fn create(
        source_type: SourceType,
        config: &TellarConfig,
    ) -> RepositoryResult<Arc<dyn RecordSource>> {
        info!("Creating {} record source", source_type);
        match source_type {
            SourceType::Local => match &config.source.data_file {
                Some(path) => Ok(Self::create_local_from_file(path)?),
                None => Ok(Self::create_local()),
            },
            SourceType::Synthetic => Ok(Self::create_synthetic(
                config.source.record_count,
                config.source.seed,
            )),
            SourceType::PocketBase => {
                #[cfg(feature = "pocketbase-source")]
                {
                    let pb_config = config.to_pocketbase_config()?.ok_or_else(|| {
                        RepositoryError::configuration(
                            "PocketBase source requires pocketbase settings",
                        )
                    })?;
                    let pb = Self::create_pocketbase(pb_config)?;
                    Ok(pb as Arc<dyn RecordSource>)
                }
                #[cfg(not(feature = "pocketbase-source"))]
                {
                    let _ = config;
                    Err(RepositoryError::configuration(
                        "PocketBase source feature not enabled",
                    ))
                }
            }
        }
    }

    /// Create an empty in-memory source.
    pub fn create_local() -> Arc<dyn RecordSource> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory source preloaded from a JSON dump.
    pub fn create_local_from_file<P: AsRef<Path>>(
        path: P,
    ) -> RepositoryResult<Arc<dyn RecordSource>> {
        Ok(Arc::new(LocalRepository::from_json_file(path)?))
    }

    pub fn create_synthetic(count: usize, seed: Option<u64>) -> Arc<dyn RecordSource> {
        Arc::new(SyntheticSource::new(count, seed))
    }

    /// Create a remote PocketBase source.
    #[cfg(feature = "pocketbase-source")]
    pub fn create_pocketbase(config: PocketBaseConfig) -> RepositoryResult<Arc<PocketBaseSource>> {
        Ok(Arc::new(PocketBaseSource::new(config)?))
    }

    /// Create a source from a resolved configuration.
    pub fn from_config(config: &TellarConfig) -> RepositoryResult<Arc<dyn RecordSource>> {
        let source_type = config.source_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid source type: {}", e))
        })?;
        Self::create(source_type, config)
    }
}
