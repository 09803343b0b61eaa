//! Lockstep Store - Persistence layer for leases and snapshots
//!
//! Provides:
//! - SQLite lock database with a migrations framework
//! - The conditional-write lease store (the coordination core)
//! - The filesystem snapshot store with atomic publish

pub mod db;
pub mod errors;
pub mod lease;
pub mod migrations;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use lease::{LeaseStore, SqliteLeaseStore};
pub use snapshot::{FetchOutcome, FsSnapshotStore, SnapshotStore};
