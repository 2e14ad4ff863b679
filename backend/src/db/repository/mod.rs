//! Record source abstraction.
//!
//! The dashboard treats wherever interaction records come from as an opaque
//! collaborator with a single read operation. Implementations live in
//! [`crate::db::repositories`].
//!
//! # Module Organization
//!
//! - [`error`]: Error types for source operations
//! - [`source`]: The [`RecordSource`] trait

pub mod error;
pub mod source;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use source::RecordSource;
