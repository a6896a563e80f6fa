//! SQLite document store
//!
//! Persists raw records as JSON text, one SQLite table per logical table
//! name. Each table holds the primary key value, the document, and
//! bookkeeping timestamps; writes are upserts (last writer wins).

#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension};

use docbind_core::store::{ItemKey, RawRecord, StoreClient};

use crate::db;
use crate::errors::{
    doc_error, from_rusqlite, invalid_table, missing_key_value, poisoned, unknown_table, Result,
};

/// SQLite-backed document store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    // logical table name -> primary key field
    tables: Mutex<HashMap<String, String>>,
}

impl SqliteStore {
    /// Open (or create) a document store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        db::configure(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            tables: Mutex::new(HashMap::new()),
        })
    }

    /// Open an in-memory document store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        db::configure(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            tables: Mutex::new(HashMap::new()),
        })
    }

    /// Create a document table with the given primary key field (idempotent)
    ///
    /// The table name is interpolated into DDL, so it must be a plain
    /// identifier; anything else is rejected before touching the database.
    pub fn create_table(&self, table: &str, primary_key: &str) -> Result<()> {
        if !is_identifier(table) {
            return Err(invalid_table(table));
        }

        let conn = self.conn.lock().map_err(|_| poisoned("sqlite store"))?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    pk TEXT PRIMARY KEY,
                    doc TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                table
            ),
            [],
        )
        .map_err(|e| from_rusqlite("create_table", e))?;

        self.tables
            .lock()
            .map_err(|_| poisoned("sqlite store"))?
            .insert(table.to_string(), primary_key.to_string());
        Ok(())
    }

    fn primary_key_for(&self, op: &str, table: &str) -> Result<String> {
        self.tables
            .lock()
            .map_err(|_| poisoned("sqlite store"))?
            .get(table)
            .cloned()
            .ok_or_else(|| unknown_table(op, table))
    }
}

impl StoreClient for SqliteStore {
    fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<RawRecord>> {
        // reject lookups against tables this store has never created
        self.primary_key_for("get_item", table)?;

        let conn = self.conn.lock().map_err(|_| poisoned("sqlite store"))?;
        let doc: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE pk = ?1", table),
                [&key.value],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| from_rusqlite("get_item", e))?;

        match doc {
            None => Ok(None),
            Some(doc) => {
                let value: serde_json::Value = serde_json::from_str(&doc).map_err(doc_error)?;
                match value {
                    serde_json::Value::Object(record) => Ok(Some(record)),
                    _ => Err(docbind_core::errors::DocBindError::Serialization {
                        reason: format!("stored document in '{}' is not a mapping", table),
                    }),
                }
            }
        }
    }

    fn put_item(&self, table: &str, record: &RawRecord) -> Result<()> {
        let primary_key = self.primary_key_for("put_item", table)?;
        let key = record_key(record, &primary_key)
            .ok_or_else(|| missing_key_value(table, &primary_key))?;

        let doc = serde_json::to_string(record).map_err(doc_error)?;
        let now = chrono::Utc::now().timestamp();

        let conn = self.conn.lock().map_err(|_| poisoned("sqlite store"))?;
        conn.execute(
            &format!(
                "INSERT INTO {} (pk, doc, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT(pk) DO UPDATE SET
                    doc = excluded.doc,
                    updated_at = excluded.updated_at",
                table
            ),
            rusqlite::params![key, doc, now],
        )
        .map_err(|e| from_rusqlite("put_item", e))?;

        Ok(())
    }
}

/// Extract a record's primary key value as a string
fn record_key(record: &RawRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Plain-identifier check for table names interpolated into SQL
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
