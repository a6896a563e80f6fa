//! Database connection management
//!
//! Provides utilities for opening and managing SQLite connections for the
//! document-store backend

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("open_in_memory", e))
}

/// Configure a connection with the settings the document store expects
pub fn configure(conn: &Connection) -> Result<()> {
    // WAL mode for concurrent readers during writes
    conn.execute_batch("PRAGMA journal_mode = WAL")
        .map_err(|e| from_rusqlite("configure", e))?;

    // Wait rather than fail when another connection holds the write lock
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(|e| from_rusqlite("configure", e))?;

    Ok(())
}
