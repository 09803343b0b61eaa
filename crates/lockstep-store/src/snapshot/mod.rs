//! Snapshot Store Client
//!
//! Provides:
//! - The `SnapshotStore` contract for whole-object fetch and publish
//! - The filesystem-backed implementation with atomic publish

mod atomic;
mod fs_store;

pub use fs_store::FsSnapshotStore;

use crate::errors::Result;
use std::path::Path;

/// Result of a fetch: the object either existed or was never published
///
/// `NotFound` is an outcome, not an error. It is how the orchestrator
/// tells a never-initialized resource (bootstrap an empty database) apart
/// from a transient store failure (`FetchFailed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The object was copied into the destination path
    Fetched,
    /// No object has ever been published under this resource name
    NotFound,
}

/// Contract for moving whole database snapshots in and out of the store.
///
/// A dumb blob mover: no concurrency control lives here. Mutual exclusion
/// is entirely delegated to the lease store, and neither method is called
/// outside a held lease.
pub trait SnapshotStore {
    /// Copy the authoritative object for `resource_id` to `dest_path`.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailed` when the store fails; a missing object is the
    /// `NotFound` outcome, not an error.
    fn fetch(&self, resource_id: &str, dest_path: &Path) -> Result<FetchOutcome>;

    /// Atomically replace the authoritative object for `resource_id` with
    /// the file at `src_path`.
    ///
    /// # Errors
    ///
    /// Returns `PublishFailed`. The caller must treat the durability of
    /// the attempted write as unknown.
    fn publish(&self, src_path: &Path, resource_id: &str) -> Result<()>;
}
