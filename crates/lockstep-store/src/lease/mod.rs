//! Lease Lock Manager
//!
//! Provides:
//! - The `LeaseStore` contract for acquire/release of named leases
//! - The SQLite-backed implementation built on an atomic conditional write

mod sqlite;

pub use sqlite::SqliteLeaseStore;

use crate::errors::Result;
use lockstep_core::model::{AcquireOutcome, LeaseRecord, ReleaseOutcome};
use lockstep_core_types::HolderId;

/// Contract for lease acquisition and release against a shared lock store.
///
/// `try_acquire` must be a single atomic conditional write: the
/// "absent or expired" precondition is evaluated by the backing store at
/// write time, never by a read in this process followed by a separate
/// write. Two workers racing to reclaim the same stale lease must never
/// both succeed.
pub trait LeaseStore {
    /// Acquire or reclaim the lease on `resource_id` for `holder_id`,
    /// valid for `lease_secs` from now.
    ///
    /// Succeeds when no record exists for the resource or the existing
    /// record is stale (expiry strictly in the past). `Conflict` is an
    /// expected outcome under contention, not an error; it carries what is
    /// known about the current holder so the caller can decide whether to
    /// wait, retry, or abort.
    ///
    /// # Errors
    ///
    /// Returns a `LockService` error when the backing store itself fails.
    fn try_acquire(
        &self,
        resource_id: &str,
        holder_id: &HolderId,
        lease_secs: u64,
    ) -> Result<AcquireOutcome>;

    /// Release the lease on `resource_id`, fenced by `holder_id`.
    ///
    /// Deletes the record only if it is still owned by `holder_id`;
    /// another holder's record is never touched. `NotHolder` means the
    /// lease expired and was reclaimed, or was never held; callers log it
    /// and move on, since the operation the lease protected has already
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns a `LockService` error when the backing store itself fails.
    fn release(&self, resource_id: &str, holder_id: &HolderId) -> Result<ReleaseOutcome>;

    /// Read the current record for `resource_id` without interpretation
    fn load(&self, resource_id: &str) -> Result<Option<LeaseRecord>>;

    /// All physically present records ordered by resource id
    ///
    /// Stale records are included; the consumer labels them.
    fn list(&self) -> Result<Vec<LeaseRecord>>;

    /// Unconditionally delete the record for `resource_id`, bypassing the
    /// holder fence
    ///
    /// Operator escape hatch only; never called from the orchestration
    /// path. Returns whether a record was removed.
    fn force_break(&self, resource_id: &str) -> Result<bool>;
}
