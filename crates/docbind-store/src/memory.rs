//! In-memory document store
//!
//! A mutex-guarded table -> key -> record map implementing the
//! `StoreClient` contract. Used by tests and ephemeral deployments; the
//! semantics (point reads, full-item upsert writes, last writer wins)
//! match the SQLite backend.

use std::collections::HashMap;
use std::sync::Mutex;

use docbind_core::store::{ItemKey, RawRecord, StoreClient};

use crate::errors::{missing_key_value, poisoned, unknown_table, Result};

struct TableData {
    primary_key: String,
    items: HashMap<String, RawRecord>,
}

/// In-memory store for raw records
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, TableData>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given primary key field (idempotent)
    pub fn create_table(&self, table: &str, primary_key: &str) -> Result<()> {
        let mut tables = self.tables.lock().map_err(|_| poisoned("memory store"))?;
        tables.entry(table.to_string()).or_insert_with(|| TableData {
            primary_key: primary_key.to_string(),
            items: HashMap::new(),
        });
        Ok(())
    }

    /// Number of items currently stored in a table
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .lock()
            .ok()
            .and_then(|tables| tables.get(table).map(|t| t.items.len()))
            .unwrap_or(0)
    }

    /// Whether a table holds no items
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

impl StoreClient for MemoryStore {
    fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<RawRecord>> {
        let tables = self.tables.lock().map_err(|_| poisoned("memory store"))?;
        let data = tables
            .get(table)
            .ok_or_else(|| unknown_table("get_item", table))?;
        Ok(data.items.get(&key.value).cloned())
    }

    fn put_item(&self, table: &str, record: &RawRecord) -> Result<()> {
        let mut tables = self.tables.lock().map_err(|_| poisoned("memory store"))?;
        let data = tables
            .get_mut(table)
            .ok_or_else(|| unknown_table("put_item", table))?;

        let key = record_key(record, &data.primary_key)
            .ok_or_else(|| missing_key_value(table, &data.primary_key))?;
        data.items.insert(key, record.clone());
        Ok(())
    }
}

/// Extract a record's primary key value as a string
///
/// String keys pass through; numeric keys use their canonical rendering.
fn record_key(record: &RawRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
