//! Error handling for lockstep-store
//!
//! Wraps lockstep-core LsError with store-specific helpers

use lockstep_core::errors::{LsError, LsErrorKind};

/// Result type alias using LsError
pub type Result<T> = std::result::Result<T, LsError>;

/// Create a lock-service error from a rusqlite failure
pub fn lock_service(op: &str, err: rusqlite::Error) -> LsError {
    LsError::new(LsErrorKind::LockService)
        .with_op(op)
        .with_message(err.to_string())
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> LsError {
    LsError::new(LsErrorKind::LockService)
        .with_op("migration")
        .with_message(format!("migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> LsError {
    LsError::new(LsErrorKind::LockService)
        .with_op("migration_checksum")
        .with_message(format!(
            "checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a fetch error from an IO failure
pub fn fetch_failed(resource_id: &str, err: std::io::Error) -> LsError {
    LsError::new(LsErrorKind::FetchFailed)
        .with_op("fetch_snapshot")
        .with_resource_id(resource_id)
        .with_message(err.to_string())
}

/// Create a publish error from an IO failure
pub fn publish_failed(resource_id: &str, err: std::io::Error) -> LsError {
    LsError::new(LsErrorKind::PublishFailed)
        .with_op("publish_snapshot")
        .with_resource_id(resource_id)
        .with_message(err.to_string())
}
