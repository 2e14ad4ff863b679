//! # TELLAR Analytics Backend
//!
//! Data layer of the TELLAR interaction telemetry dashboard.
//!
//! Interaction records (one per visitor session with a camera filter) come
//! from a record source, get normalized, and are turned into chart rows,
//! paginated report tables, exports and per-filter statistics. The backend
//! exposes all of it as a REST API via Axum for the browser front end.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`db`]: Record sources, configuration and the source factory
//! - [`models`]: Raw and normalized records, filter ids, report filters
//! - [`services`]: Normalization, aggregation, reports, exports, snapshot cache
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types and paths
//!
//! Aggregates are never stored. Every view is recomputed from the current
//! snapshot, which only changes when the cache is refreshed.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
