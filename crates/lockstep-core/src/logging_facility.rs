//! Structured logging facility.
//!
//! Every lockstep component logs through one scheme: operations open with
//! `log_op_start!`, close with `log_op_end!` or `log_op_error!`, and mark
//! progress with `log_phase!`. All four stamp the canonical schema fields
//! (`component`, `op`, `event`/`phase`) so output is filterable regardless
//! of format.
//!
//! Binaries call [`init`] once at startup to pick an output profile; tests
//! install the in-memory capture layer via
//! [`test_capture::init_test_capture`] and assert on the recorded events.
//!
//! ```rust
//! use lockstep_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
