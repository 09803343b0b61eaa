//! Operation cycle orchestration.
//!
//! ## Cycle (in order):
//! 1. Validate the request (no shared state touched yet)
//! 2. Acquire the lease under a fresh holder id (conflict is terminal)
//! 3. Stage the snapshot in a working copy (missing object → bootstrap an
//!    empty database)
//! 4. Execute the statement against the working copy
//! 5. Publish the working copy back to the store
//! 6. Release the lease and discard the working copy on every exit path
//!    past step 2

#![allow(clippy::result_large_err)]

use std::time::Instant;

use lockstep_core::errors::{LsError, LsErrorKind};
use lockstep_core::{
    AcquireOutcome, LockstepConfig, OperationRequest, OperationResult, ReleaseOutcome,
};
use lockstep_core_types::HolderId;
use lockstep_store::{FetchOutcome, LeaseStore, SnapshotStore};
use tracing::warn;

use crate::errors::Result;
use crate::executor::{execute_statement, StatementOutput};
use crate::working_copy::WorkingCopy;

/// Options for one operation cycle.
#[derive(Debug, Clone)]
pub struct OperationOptions {
    /// Resource name used when the request does not name one
    pub default_resource: String,
    /// Lease duration granted on acquire, in seconds
    pub lease_secs: u64,
}

impl From<&LockstepConfig> for OperationOptions {
    fn from(config: &LockstepConfig) -> Self {
        Self {
            default_resource: config.default_resource.clone(),
            lease_secs: config.lease_secs,
        }
    }
}

/// Result of a successfully completed operation cycle.
#[derive(Debug, Clone)]
pub struct OperationCycleResult {
    /// Resource the cycle ran against
    pub resource_id: String,
    /// Holder id the lease was acquired under
    pub holder_id: HolderId,
    /// Whether the resource had no snapshot and was bootstrapped empty
    pub bootstrapped: bool,
    /// Effect of the executed statement
    pub output: StatementOutput,
}

impl OperationCycleResult {
    /// Convert into the wire envelope.
    pub fn into_envelope(self) -> OperationResult {
        match self.output {
            StatementOutput::Rows(rows) => OperationResult::success_rows(rows),
            StatementOutput::Affected(affected) => OperationResult::success_affected(affected),
        }
    }
}

/// Run one copy-modify-write cycle.
///
/// Acquires the lease, stages the snapshot in a working copy, executes the
/// statement, publishes the result, and releases the lease. The lease is
/// released and the working copy discarded on every exit path past
/// acquisition, so a statement or publish failure never leaves the resource
/// locked beyond its lease duration.
///
/// ## Arguments
/// - `request`: Statement plus optional resource name
/// - `options`: Default resource and lease duration
/// - `lease_store`: Lease lock manager client
/// - `snapshot_store`: Snapshot store client
pub fn run_operation(
    request: &OperationRequest,
    options: &OperationOptions,
    lease_store: &dyn LeaseStore,
    snapshot_store: &dyn SnapshotStore,
) -> Result<OperationCycleResult> {
    let start = Instant::now();
    let resource_id = request
        .resource_or_default(&options.default_resource)
        .to_string();
    lockstep_core::log_op_start!("run_operation", resource_id = resource_id.as_str());

    let outcome = run_cycle(request, &resource_id, options, lease_store, snapshot_store);

    match outcome {
        Ok(result) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            lockstep_core::log_op_end!(
                "run_operation",
                duration_ms = duration_ms,
                resource_id = resource_id.as_str(),
                bootstrapped = result.bootstrapped
            );
            Ok(result)
        }
        Err(e) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            lockstep_core::log_op_error!("run_operation", e.clone(), duration_ms = duration_ms);
            Err(e)
        }
    }
}

/// Run the cycle steps against an already-resolved resource name.
fn run_cycle(
    request: &OperationRequest,
    resource_id: &str,
    options: &OperationOptions,
    lease_store: &dyn LeaseStore,
    snapshot_store: &dyn SnapshotStore,
) -> Result<OperationCycleResult> {
    // Step 1: Validate before touching any shared state
    request.validate()?;

    // Step 2: Acquire the lease under a fresh holder id; a conflict is a
    // terminal outcome, never an in-process wait
    let holder_id = HolderId::new();
    lockstep_core::log_phase!(
        "run_operation",
        "acquiring",
        resource_id = resource_id,
        holder_id = %holder_id
    );
    match lease_store.try_acquire(resource_id, &holder_id, options.lease_secs)? {
        AcquireOutcome::Acquired(_) => {}
        AcquireOutcome::Conflict {
            current_holder,
            expires_at,
        } => {
            return Err(conflict_error(resource_id, current_holder, expires_at));
        }
    }

    // Steps 3-5 run under the lease; the working-copy guard discards the
    // scratch directory on every path out of locked_phases
    let result = locked_phases(request, resource_id, &holder_id, snapshot_store);

    // Step 6: Release on every path, success or failure
    release_lease(lease_store, resource_id, &holder_id);

    result
}

/// Fetch, execute, and publish under an already-held lease.
fn locked_phases(
    request: &OperationRequest,
    resource_id: &str,
    holder_id: &HolderId,
    snapshot_store: &dyn SnapshotStore,
) -> Result<OperationCycleResult> {
    // Step 3: Stage the snapshot in a private working copy
    lockstep_core::log_phase!("run_operation", "fetching", resource_id = resource_id);
    let working_copy =
        WorkingCopy::create(resource_id).map_err(|e| e.with_resource_id(resource_id))?;
    let bootstrapped = match snapshot_store.fetch(resource_id, working_copy.db_path())? {
        FetchOutcome::Fetched => false,
        FetchOutcome::NotFound => {
            // First use of this resource: start from a valid empty database
            working_copy
                .bootstrap_empty_database()
                .map_err(|e| e.with_resource_id(resource_id))?;
            true
        }
    };

    // Step 4: Execute the statement against the working copy
    lockstep_core::log_phase!("run_operation", "executing", resource_id = resource_id);
    let output = execute_statement(working_copy.db_path(), &request.statement)
        .map_err(|e| e.with_resource_id(resource_id))?;

    // Step 5: Publish the working copy back to the store; this also runs
    // for read-only statements, so the remote object round-trips unchanged
    lockstep_core::log_phase!("run_operation", "publishing", resource_id = resource_id);
    snapshot_store.publish(working_copy.db_path(), resource_id)?;

    Ok(OperationCycleResult {
        resource_id: resource_id.to_string(),
        holder_id: holder_id.clone(),
        bootstrapped,
        output,
    })
}

/// Build the terminal conflict error with whatever holder details the store
/// could observe.
fn conflict_error(
    resource_id: &str,
    current_holder: Option<String>,
    expires_at: Option<i64>,
) -> LsError {
    let message = match (current_holder.as_deref(), expires_at) {
        (Some(holder), Some(expires_at)) => {
            format!("resource is leased by {} until epoch {}", holder, expires_at)
        }
        (Some(holder), None) => format!("resource is leased by {}", holder),
        _ => "resource is leased by another holder".to_string(),
    };
    let err = LsError::new(LsErrorKind::LockConflict)
        .with_op("run_operation")
        .with_resource_id(resource_id)
        .with_message(message);
    match current_holder {
        Some(holder) => err.with_holder_id(holder),
        None => err,
    }
}

/// Release the lease held by `holder_id`, absorbing failures.
///
/// A failure here is logged, never escalated: the cycle's outcome is already
/// fixed, and an unreleased record is reclaimed through expiry.
fn release_lease(lease_store: &dyn LeaseStore, resource_id: &str, holder_id: &HolderId) {
    match lease_store.release(resource_id, holder_id) {
        Ok(ReleaseOutcome::Released) => {
            lockstep_core::log_phase!(
                "run_operation",
                "releasing",
                resource_id = resource_id,
                holder_id = %holder_id
            );
        }
        Ok(ReleaseOutcome::NotHolder) => {
            warn!(
                resource_id = resource_id,
                holder_id = %holder_id,
                "lease was no longer held at release time"
            );
        }
        Err(err) => {
            warn!(
                resource_id = resource_id,
                holder_id = %holder_id,
                error = %err,
                "lease release failed; the record will expire on its own"
            );
        }
    }
}
