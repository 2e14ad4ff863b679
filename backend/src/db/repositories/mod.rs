//! Record source implementations:
//! - `local`: In-memory store for tests and JSON dumps
//! - `synthetic`: Seeded demo data generator
//! - `pocketbase`: Remote record collection over HTTP
pub mod local;
#[cfg(feature = "pocketbase-source")]
pub mod pocketbase;
pub mod synthetic;

pub use local::LocalRepository;
#[cfg(feature = "pocketbase-source")]
pub use pocketbase::{PocketBaseConfig, PocketBaseSource};
pub use synthetic::SyntheticSource;
