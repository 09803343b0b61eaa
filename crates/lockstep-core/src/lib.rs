//! Lockstep Core - Protocol vocabulary and facilities
//!
//! This crate provides the foundational pieces shared by every lockstep
//! component:
//! - The canonical error facility (`LsError`, `LsErrorKind`) with stable
//!   codes and HTTP status mapping
//! - The structured logging facility (init profiles, op macros, test capture)
//! - The domain model: lease records, operation requests and the result
//!   envelope
//! - The environment-level configuration surface

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use config::LockstepConfig;
pub use errors::{LsError, LsErrorKind, Result};
pub use model::{AcquireOutcome, LeaseRecord, OperationRequest, OperationResult, ReleaseOutcome};
