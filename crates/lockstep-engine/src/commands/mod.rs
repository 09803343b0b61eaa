//! Command orchestration layer.
//!
//! High-level operations that coordinate the lease store, the snapshot
//! store, and the statement executor.

pub mod operation;
