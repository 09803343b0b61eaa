use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One lease record - the remote representation of exclusive access
///
/// Each record:
/// - Names exactly one resource (`resource_id` is the primary key)
/// - Names its current owner (`holder_id`, the fencing token)
/// - Carries an absolute expiry in epoch seconds
///
/// A record whose expiry has passed is *stale*: semantically absent even
/// though it is still physically present until a new holder overwrites it
/// or its own holder deletes it on release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseRecord {
    /// Resource this lease guards
    pub resource_id: String,

    /// Identity of the current owner, unique per acquisition attempt
    pub holder_id: String,

    /// Absolute expiry, epoch seconds
    pub lease_expiry: i64,

    /// When the lease was created, epoch seconds
    pub created_at: i64,
}

impl LeaseRecord {
    /// Check whether this record is stale at `now` (epoch seconds)
    ///
    /// Staleness is strict: the lease is still held at `now == lease_expiry`
    /// and becomes reclaimable only once `now` has moved past it.
    pub fn is_stale(&self, now: i64) -> bool {
        now > self.lease_expiry
    }

    /// Seconds until expiry at `now`, zero if already stale
    pub fn remaining_secs(&self, now: i64) -> i64 {
        (self.lease_expiry - now).max(0)
    }

    /// Expiry as a UTC datetime, if the stored value is representable
    pub fn expiry_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.lease_expiry, 0)
    }
}

/// Outcome of a TryAcquire call
///
/// `Conflict` is an expected result of contention, not a failure; it carries
/// what is known about the current holder so the caller can decide whether
/// to wait, retry, or abort. The holder details are optional because the
/// record can vanish (holder released) between the conditional write and
/// the informational read that populates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The lease was created or a stale lease was reclaimed
    Acquired(LeaseRecord),
    /// A valid lease is held by someone else
    Conflict {
        current_holder: Option<String>,
        expires_at: Option<i64>,
    },
}

impl AcquireOutcome {
    /// Check whether this outcome grants the lease
    pub fn is_acquired(&self) -> bool {
        matches!(self, AcquireOutcome::Acquired(_))
    }
}

/// Outcome of a Release call
///
/// `NotHolder` means the record either no longer exists or is owned by a
/// different holder (the lease expired and was reclaimed). Callers log it
/// and move on - the operation the lease protected has already completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The caller's record was deleted
    Released,
    /// No record owned by this holder exists
    NotHolder,
}
