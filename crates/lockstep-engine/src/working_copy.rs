//! Working-copy lifecycle
//!
//! Each operation cycle gets a private scratch directory holding its local
//! copy of the resource. The guard removes the directory on drop, so the
//! copy is discarded on every exit path, including panics and early returns.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

use crate::errors::{bootstrap_error, working_copy_error, Result};

/// Scratch directory owning one cycle's local copy of a resource
#[derive(Debug)]
pub struct WorkingCopy {
    dir: PathBuf,
    db_path: PathBuf,
}

impl WorkingCopy {
    /// Create a fresh scratch directory for `resource_id`
    ///
    /// # Errors
    ///
    /// Returns `LsErrorKind::FetchFailed` if the directory cannot be created.
    pub fn create(resource_id: &str) -> Result<Self> {
        let dir = std::env::temp_dir().join(format!("lockstep-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).map_err(working_copy_error)?;
        let db_path = dir.join(resource_id);
        Ok(Self { dir, db_path })
    }

    /// Path where the resource's local copy lives (or will live)
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Materialize a valid empty database at `db_path`
    ///
    /// Used when the resource has no snapshot yet. VACUUM forces the header
    /// page out, so the file is a well-formed database rather than zero
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns `LsErrorKind::FetchFailed` if the database cannot be created.
    pub fn bootstrap_empty_database(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path).map_err(bootstrap_error)?;
        conn.execute_batch("VACUUM").map_err(bootstrap_error)?;
        Ok(())
    }
}

impl Drop for WorkingCopy {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.dir) {
            tracing::warn!(dir = ?self.dir, error = %err, "failed to remove working copy");
        }
    }
}
