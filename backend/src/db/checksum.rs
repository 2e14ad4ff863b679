//! Content fingerprints for record snapshots.

use sha2::{Digest, Sha256};

use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::NormalizedRecord;

/// Calculate the SHA-256 checksum of some content as lowercase hex.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Fingerprint of a normalized snapshot: SHA-256 of its JSON serialization.
///
/// Two snapshots with the same records in the same order share a fingerprint.
pub fn snapshot_fingerprint(records: &[NormalizedRecord]) -> RepositoryResult<String> {
    let json = serde_json::to_string(records).map_err(|e| {
        RepositoryError::internal(format!("Failed to serialize snapshot: {}", e))
            .with_operation("snapshot_fingerprint")
    })?;
    Ok(calculate_checksum(&json))
}
