//! The store seam
//!
//! The engine talks to the document store exclusively through the
//! `StoreClient` trait. Backends live in `docbind-store`; this module only
//! owns the contract: single-key point reads and full-item writes against
//! a raw, untyped record shape.

use crate::errors::Result;

/// A store-native value as it crosses the wire
pub type RawValue = serde_json::Value;

/// The untyped mapping shape the store accepts and produces
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Primary-key selector for a point read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    /// Name of the primary key field
    pub field: String,
    /// Key value to look up
    pub value: String,
}

impl ItemKey {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Point-operation contract against the document store
///
/// Each call is an independent blocking request. `put_item` is a full item
/// replacement: last writer wins, no conflict detection. Transport
/// failures surface as `Persistence` errors and are never retried here.
pub trait StoreClient: Send + Sync {
    /// Fetch the record stored under `key` in `table`, if any
    fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<RawRecord>>;

    /// Write `record` into `table`, replacing any existing item with the
    /// same primary key
    fn put_item(&self, table: &str, record: &RawRecord) -> Result<()>;
}
