//! Canonical logging macros.
//!
//! Every operation boundary is logged through these macros so the emitted
//! events carry the same schema fields regardless of which crate logs them.
//! `log_phase!` marks progress inside an operation between its start and
//! end boundaries.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use lockstep_core::log_op_start;
/// log_op_start!("run_operation");
/// log_op_start!("run_operation", resource_id = "database.db");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lockstep_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lockstep_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use lockstep_core::log_op_end;
/// log_op_end!("run_operation", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lockstep_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lockstep_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a phase transition inside an operation cycle
///
/// Phase events are debug-level progress markers; they never replace the
/// start and end boundaries of the surrounding operation.
///
/// # Example
///
/// ```
/// # use lockstep_core::log_phase;
/// log_phase!("run_operation", "acquiring", resource_id = "database.db");
/// ```
#[macro_export]
macro_rules! log_phase {
    ($op:expr, $phase:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            phase = $phase,
        );
    };
    ($op:expr, $phase:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            phase = $phase,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use lockstep_core::log_op_error;
/// # use lockstep_core::errors::{LsError, LsErrorKind};
/// let err = LsError::new(LsErrorKind::LockConflict).with_resource_id("database.db");
/// log_op_error!("run_operation", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::LsError;
        let ls_err: LsError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = lockstep_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ls_err.kind(),
            err_code = ls_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::LsError;
        let ls_err: LsError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = lockstep_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ls_err.kind(),
            err_code = ls_err.code(),
            $($field)*
        );
    }};
}
