//! Database connection management
//!
//! Provides utilities for opening and configuring the shared lock database

#![allow(clippy::result_large_err)]

use crate::errors::{lock_service, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Open and configure the lock database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|e| lock_service("open_lock_db", e))?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an in-memory lock database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| lock_service("open_lock_db", e))?;
    configure(&conn)?;
    Ok(conn)
}

/// Configure a connection for concurrent workers sharing the file
pub fn configure(conn: &Connection) -> Result<()> {
    // Enable foreign keys
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(|e| lock_service("configure_lock_db", e))?;

    // Set WAL mode so readers don't block the writer. The pragma returns
    // the resulting mode as a row, so it must go through query_row.
    conn.query_row("PRAGMA journal_mode = WAL", [], |_row| Ok(()))
        .map_err(|e| lock_service("configure_lock_db", e))?;

    // Wait instead of failing when another worker holds the write lock
    conn.busy_timeout(Duration::from_millis(5000))
        .map_err(|e| lock_service("configure_lock_db", e))?;

    Ok(())
}
