//! Lockstep Engine - Orchestration layer
//!
//! Coordinates one copy-modify-write cycle per request: lease acquisition,
//! snapshot staging in a working copy, statement execution, publish, and
//! release.

pub mod commands;
pub mod errors;
pub mod executor;
pub mod working_copy;

pub use commands::operation::{run_operation, OperationCycleResult, OperationOptions};
pub use errors::Result;
pub use executor::{execute_statement, StatementOutput};
pub use working_copy::WorkingCopy;
