//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies are re-exported from the routes module since they already
//! derive Serialize/Deserialize; this file adds query strings and the health
//! response.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    // Dashboard
    DashboardData, DashboardTotals, DemographicBucket, FilterCount, InteractionBucket,
    // Filter performance
    FilterStats,
    // Records
    RefreshResponse,
    // Reports
    FilterBadge, ReportPage, ReportTable,
};

/// Query parameters for the report page endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportQuery {
    /// Report filter key (default: `all`)
    #[serde(default)]
    pub filter: Option<String>,
    /// 1-indexed page (default: 1)
    #[serde(default)]
    pub page: Option<usize>,
    /// Rows per page (default from configuration, capped)
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Query parameters for the export endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

/// Query parameters for the filter gallery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GalleryQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Record source backend name
    pub source: String,
    /// Record source reachability
    pub source_status: String,
}
