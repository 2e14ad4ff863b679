//! Record source layer.
//!
//! Interaction records come from an opaque source behind the
//! [`RecordSource`] trait, so the dashboard never knows whether it is looking
//! at demo data, a JSON dump or a live collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Degrade failed fetches to an empty list              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  RecordSource trait (repository/source.rs)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┼──────────────────┐
//!     │               │                  │
//!  Local          Synthetic          PocketBase
//!  (in-memory)    (seeded demo)      (reqwest)
//! ```
//!
//! # Recommended Usage
//! ```ignore
//! use tellar::db::{fetch_records, SourceFactory, TellarConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TellarConfig::load()?;
//!     let source = SourceFactory::from_config(&config)?;
//!     let records = fetch_records(source.as_ref()).await;
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


pub use services::{fetch_records, health_check};

pub use checksum::{calculate_checksum, snapshot_fingerprint};
pub use factory::{SourceFactory, SourceType};
pub use repo_config::{PocketBaseSettings, ReportSettings, SourceSettings, TellarConfig};
#[cfg(feature = "pocketbase-source")]
pub use repositories::{PocketBaseConfig, PocketBaseSource};
pub use repositories::{LocalRepository, SyntheticSource};
pub use repository::{ErrorContext, RecordSource, RepositoryError, RepositoryResult};
