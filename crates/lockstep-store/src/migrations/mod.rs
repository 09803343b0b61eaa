//! Migration framework
//!
//! Provides:
//! - Migration runner with per-migration checksums
//! - Idempotent application
//! - Embedded SQL migrations

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_migrations;
