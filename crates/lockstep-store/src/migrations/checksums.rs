//! Checksum validation for migrations
//!
//! Migration SQL is hashed so later runs can detect edits to an
//! already-applied migration.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of migration SQL, hex encoded
pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sql.as_bytes());
    hex::encode(hasher.finalize())
}
