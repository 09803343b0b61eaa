//! SQLite-backed lease store
//!
//! The conditional write is a single upsert whose DO UPDATE clause is
//! predicated on expiry, evaluated atomically by SQLite at write time.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{lock_service, Result};
use crate::lease::LeaseStore;
use crate::migrations;
use lockstep_core::model::{AcquireOutcome, LeaseRecord, ReleaseOutcome};
use lockstep_core_types::HolderId;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use tracing::warn;

/// Lease store backed by a shared SQLite lock database
///
/// Each worker opens its own handle; coordination happens entirely through
/// the database file, exactly as it would through a remote lock service.
pub struct SqliteLeaseStore {
    conn: Connection,
}

impl SqliteLeaseStore {
    /// Open the lock database at `path`, applying pending migrations
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory lock database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Acquire or reclaim a lease with an explicit clock
    ///
    /// `now` is epoch seconds. The wall-clock `try_acquire` delegates
    /// here; timing tests drive this method directly instead of sleeping.
    pub fn try_acquire_at(
        &self,
        resource_id: &str,
        holder_id: &HolderId,
        lease_secs: u64,
        now: i64,
    ) -> Result<AcquireOutcome> {
        let lease_expiry = now + lease_secs as i64;

        // One conditional write: insert, or overwrite only a stale record.
        // The expiry predicate runs inside SQLite, so two racing reclaims
        // cannot both observe the record as stale.
        let changed = self
            .conn
            .execute(
                "INSERT INTO leases (resource_id, holder_id, lease_expiry, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(resource_id) DO UPDATE SET
                    holder_id = excluded.holder_id,
                    lease_expiry = excluded.lease_expiry,
                    created_at = excluded.created_at
                 WHERE leases.lease_expiry < ?4",
                rusqlite::params![resource_id, holder_id.as_str(), lease_expiry, now],
            )
            .map_err(|e| {
                lock_service("try_acquire", e)
                    .with_resource_id(resource_id)
                    .with_holder_id(holder_id.as_str())
            })?;

        if changed == 1 {
            return Ok(AcquireOutcome::Acquired(LeaseRecord {
                resource_id: resource_id.to_string(),
                holder_id: holder_id.as_str().to_string(),
                lease_expiry,
                created_at: now,
            }));
        }

        // Conflict: re-read for the current holder's details. The record
        // can vanish between the write and this read (holder released in
        // the gap); report the conflict with an unknown holder rather
        // than retrying.
        match self.load(resource_id)? {
            Some(current) => Ok(AcquireOutcome::Conflict {
                current_holder: Some(current.holder_id),
                expires_at: Some(current.lease_expiry),
            }),
            None => Ok(AcquireOutcome::Conflict {
                current_holder: None,
                expires_at: None,
            }),
        }
    }
}

/// Current wall-clock time in epoch seconds
fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl LeaseStore for SqliteLeaseStore {
    fn try_acquire(
        &self,
        resource_id: &str,
        holder_id: &HolderId,
        lease_secs: u64,
    ) -> Result<AcquireOutcome> {
        self.try_acquire_at(resource_id, holder_id, lease_secs, unix_now())
    }

    fn release(&self, resource_id: &str, holder_id: &HolderId) -> Result<ReleaseOutcome> {
        // Fenced delete: only the named holder's own record is removed.
        // Expiry is deliberately not checked; by the time release runs,
        // the operation the lease protected has already completed.
        let deleted = self
            .conn
            .execute(
                "DELETE FROM leases WHERE resource_id = ?1 AND holder_id = ?2",
                rusqlite::params![resource_id, holder_id.as_str()],
            )
            .map_err(|e| {
                lock_service("release", e)
                    .with_resource_id(resource_id)
                    .with_holder_id(holder_id.as_str())
            })?;

        if deleted == 0 {
            Ok(ReleaseOutcome::NotHolder)
        } else {
            Ok(ReleaseOutcome::Released)
        }
    }

    fn load(&self, resource_id: &str) -> Result<Option<LeaseRecord>> {
        self.conn
            .query_row(
                "SELECT resource_id, holder_id, lease_expiry, created_at
                 FROM leases WHERE resource_id = ?1",
                [resource_id],
                |row| {
                    Ok(LeaseRecord {
                        resource_id: row.get(0)?,
                        holder_id: row.get(1)?,
                        lease_expiry: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| lock_service("load_lease", e).with_resource_id(resource_id))
    }

    fn list(&self) -> Result<Vec<LeaseRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT resource_id, holder_id, lease_expiry, created_at
                 FROM leases ORDER BY resource_id",
            )
            .map_err(|e| lock_service("list_leases", e))?;

        let records = stmt
            .query_map([], |row| {
                Ok(LeaseRecord {
                    resource_id: row.get(0)?,
                    holder_id: row.get(1)?,
                    lease_expiry: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .map_err(|e| lock_service("list_leases", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| lock_service("list_leases", e))?;

        Ok(records)
    }

    fn force_break(&self, resource_id: &str) -> Result<bool> {
        if let Some(current) = self.load(resource_id)? {
            if !current.is_stale(unix_now()) {
                warn!(
                    resource_id = %current.resource_id,
                    holder_id = %current.holder_id,
                    lease_expiry = current.lease_expiry,
                    "force-breaking an unexpired lease"
                );
            }
        }

        let deleted = self
            .conn
            .execute("DELETE FROM leases WHERE resource_id = ?1", [resource_id])
            .map_err(|e| lock_service("force_break", e).with_resource_id(resource_id))?;

        Ok(deleted > 0)
    }
}
