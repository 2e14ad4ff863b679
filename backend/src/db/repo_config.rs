//! Configuration file support.
//!
//! Reads `tellar.toml` and applies environment overrides on top of it.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::SourceType;
use super::repository::RepositoryError;
#[cfg(feature = "pocketbase-source")]
use crate::db::repositories::PocketBaseConfig;
use crate::db::repositories::synthetic::DEFAULT_RECORD_COUNT;
use crate::services::reports::DEFAULT_PAGE_SIZE;

/// Everything `tellar.toml` can hold. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TellarConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub pocketbase: PocketBaseSettings,
    #[serde(default)]
    pub reports: ReportSettings,
}

/// Record source selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: String,
    /// Seeds the synthetic generator and the normalizer's fallback values.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_record_count")]
    pub record_count: usize,
    /// JSON dump loaded by the local source.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: default_source_type(),
            seed: None,
            record_count: default_record_count(),
            data_file: None,
        }
    }
}

/// Remote collection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketBaseSettings {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PocketBaseSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            collection: default_collection(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Report table paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ReportSettings {
    /// The requested page size, or the configured default, capped at
    /// `max_page_size`.
    pub fn resolve_page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.page_size)
            .min(self.max_page_size.max(1))
    }
}

fn default_source_type() -> String {
    "synthetic".to_string()
}

fn default_record_count() -> usize {
    DEFAULT_RECORD_COUNT
}

fn default_collection() -> String {
    "interactions".to_string()
}

fn default_per_page() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    200
}

impl TellarConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(TellarConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: TellarConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `tellar.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("tellar.toml"),
            PathBuf::from("backend/tellar.toml"),
            PathBuf::from("../tellar.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No tellar.toml found in standard locations",
        ))
    }

    /// Resolve the effective configuration for the server.
    ///
    /// `TELLAR_CONFIG` names an explicit file (which must exist); otherwise the
    /// default locations are searched and built-in defaults are used when none
    /// is found. Environment overrides are applied last.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = match std::env::var("TELLAR_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location().unwrap_or_else(|e| {
                debug!("Using built-in configuration: {}", e);
                Self::default()
            }),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `TELLAR_SOURCE`, `TELLAR_SEED`, `POCKETBASE_URL` and
    /// `POCKETBASE_COLLECTION`.
    ///
    /// `TELLAR_SOURCE` selects the source. Without it, a non-blank
    /// `POCKETBASE_URL` selects the PocketBase source.
    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        match std::env::var("TELLAR_SOURCE") {
            Ok(source) => self.source.source_type = source,
            Err(_) => {
                if std::env::var("POCKETBASE_URL").is_ok_and(|url| !url.trim().is_empty()) {
                    self.source.source_type = SourceType::PocketBase.to_string();
                }
            }
        }
        if let Ok(seed) = std::env::var("TELLAR_SEED") {
            let seed = seed.trim().parse::<u64>().map_err(|e| {
                RepositoryError::configuration(format!("Invalid TELLAR_SEED '{}': {}", seed, e))
            })?;
            self.source.seed = Some(seed);
        }
        if let Ok(url) = std::env::var("POCKETBASE_URL") {
            self.pocketbase.base_url = url;
        }
        if let Ok(collection) = std::env::var("POCKETBASE_COLLECTION") {
            self.pocketbase.collection = collection;
        }
        Ok(())
    }

    /// Get the record source type from configuration.
    pub fn source_type(&self) -> Result<SourceType, String> {
        SourceType::from_str(&self.source.source_type)
    }

    /// Convert to a `PocketBaseConfig` if the remote source is selected.
    #[cfg(feature = "pocketbase-source")]
    pub fn to_pocketbase_config(&self) -> Result<Option<PocketBaseConfig>, RepositoryError> {
        let source_type = self.source_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid source type: {}", e))
        })?;

        if source_type != SourceType::PocketBase {
            return Ok(None);
        }

        if self.pocketbase.base_url.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "PocketBase source requires 'pocketbase.base_url' setting",
            ));
        }

        Ok(Some(PocketBaseConfig {
            base_url: self.pocketbase.base_url.clone(),
            collection: self.pocketbase.collection.clone(),
            per_page: self.pocketbase.per_page,
            timeout_secs: self.pocketbase.timeout_secs,
        }))
    }
}
