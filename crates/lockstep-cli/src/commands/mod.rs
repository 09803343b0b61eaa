//! CLI command implementations

use std::path::PathBuf;

use lockstep_core::LockstepConfig;

pub mod exec;
pub mod lease;

/// Resolve the effective configuration: flags override environment
/// variables, which override defaults.
pub(crate) fn resolve_config(
    lock_db: Option<String>,
    store_root: Option<String>,
    lease_secs: Option<u64>,
) -> lockstep_core::Result<LockstepConfig> {
    let mut config = LockstepConfig::from_env()?;
    if let Some(path) = lock_db {
        config.lock_db_path = PathBuf::from(path);
    }
    if let Some(path) = store_root {
        config.store_root = PathBuf::from(path);
    }
    if let Some(secs) = lease_secs {
        config.lease_secs = secs;
    }
    Ok(config)
}
