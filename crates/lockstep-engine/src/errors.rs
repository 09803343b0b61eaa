//! Error handling for lockstep-engine
//!
//! Wraps lockstep-core LsError with engine-specific helpers

use lockstep_core::errors::{LsError, LsErrorKind};

/// Result type alias using LsError
pub type Result<T> = std::result::Result<T, LsError>;

/// Create an execution error from a rusqlite failure
pub fn execution_error(err: rusqlite::Error) -> LsError {
    LsError::new(LsErrorKind::Execution)
        .with_op("execute_statement")
        .with_message(err.to_string())
}

/// Create a working-copy setup error from an IO failure
pub fn working_copy_error(err: std::io::Error) -> LsError {
    LsError::new(LsErrorKind::FetchFailed)
        .with_op("prepare_working_copy")
        .with_message(err.to_string())
}

/// Create a bootstrap error from a rusqlite failure
pub fn bootstrap_error(err: rusqlite::Error) -> LsError {
    LsError::new(LsErrorKind::FetchFailed)
        .with_op("bootstrap_working_copy")
        .with_message(err.to_string())
}
