//! Filesystem-backed snapshot store
//!
//! One whole-file object per resource name under a root directory.

#![allow(clippy::result_large_err)]

use crate::errors::{fetch_failed, publish_failed, Result};
use crate::snapshot::atomic::atomic_write;
use crate::snapshot::{FetchOutcome, SnapshotStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot store rooted at a local directory
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store over the given root directory
    ///
    /// The directory does not need to exist yet; the first publish
    /// creates it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Authoritative object path for a resource name
    fn object_path(&self, resource_id: &str) -> PathBuf {
        self.root.join(resource_id)
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn fetch(&self, resource_id: &str, dest_path: &Path) -> Result<FetchOutcome> {
        let object = self.object_path(resource_id);

        if !object.exists() {
            return Ok(FetchOutcome::NotFound);
        }

        fs::copy(&object, dest_path).map_err(|e| fetch_failed(resource_id, e))?;

        Ok(FetchOutcome::Fetched)
    }

    fn publish(&self, src_path: &Path, resource_id: &str) -> Result<()> {
        let content = fs::read(src_path).map_err(|e| publish_failed(resource_id, e))?;

        atomic_write(&self.object_path(resource_id), &content)
            .map_err(|e| publish_failed(resource_id, e))?;

        Ok(())
    }
}
