//! Environment-level configuration surface
//!
//! Four settings drive a deployment: where the lock store lives, where the
//! snapshot store lives, the well-known resource name used when a request
//! omits one, and the lease duration. Values are resolved once, up front;
//! the resulting config is plain data passed explicitly to whoever needs it.

use std::path::PathBuf;

use crate::errors::{LsError, LsErrorKind, Result};

/// Environment variable naming the lock-store database path
pub const ENV_LOCK_DB: &str = "LOCKSTEP_LOCK_DB";
/// Environment variable naming the snapshot-store root directory
pub const ENV_STORE_ROOT: &str = "LOCKSTEP_STORE_ROOT";
/// Environment variable naming the default resource
pub const ENV_DEFAULT_RESOURCE: &str = "LOCKSTEP_DEFAULT_RESOURCE";
/// Environment variable naming the lease duration in seconds
pub const ENV_LEASE_SECS: &str = "LOCKSTEP_LEASE_SECS";

pub const DEFAULT_LOCK_DB: &str = "leases.db";
pub const DEFAULT_STORE_ROOT: &str = "snapshots";
pub const DEFAULT_RESOURCE: &str = "database.db";
pub const DEFAULT_LEASE_SECS: u64 = 300;

/// Resolved configuration for one worker
///
/// The lease duration must exceed the worst-case duration of one full
/// operation cycle (fetch + execute + publish) by a safety margin: too short
/// risks false reclamation of a healthy holder, too long delays recovery
/// after a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockstepConfig {
    /// Path of the shared SQLite lease database
    pub lock_db_path: PathBuf,
    /// Root directory of the filesystem snapshot store
    pub store_root: PathBuf,
    /// Resource name used when a request omits `resource_id`
    pub default_resource: String,
    /// Lease duration granted on acquire, in seconds
    pub lease_secs: u64,
}

impl Default for LockstepConfig {
    fn default() -> Self {
        Self {
            lock_db_path: PathBuf::from(DEFAULT_LOCK_DB),
            store_root: PathBuf::from(DEFAULT_STORE_ROOT),
            default_resource: DEFAULT_RESOURCE.to_string(),
            lease_secs: DEFAULT_LEASE_SECS,
        }
    }
}

impl LockstepConfig {
    /// Resolve the configuration from process environment variables,
    /// falling back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `LsErrorKind::Validation` if `LOCKSTEP_LEASE_SECS` is set but
    /// is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_LOCK_DB) {
            config.lock_db_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_STORE_ROOT) {
            config.store_root = PathBuf::from(path);
        }
        if let Some(name) = lookup(ENV_DEFAULT_RESOURCE) {
            config.default_resource = name;
        }
        if let Some(raw) = lookup(ENV_LEASE_SECS) {
            config.lease_secs = parse_lease_secs(&raw)?;
        }

        Ok(config)
    }
}

fn parse_lease_secs(raw: &str) -> Result<u64> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        LsError::new(LsErrorKind::Validation)
            .with_op("config")
            .with_message(format!("{} must be a positive integer, got '{}'", ENV_LEASE_SECS, raw))
    })?;
    if secs == 0 {
        return Err(LsError::new(LsErrorKind::Validation)
            .with_op("config")
            .with_message(format!("{} must be greater than zero", ENV_LEASE_SECS)));
    }
    Ok(secs)
}
