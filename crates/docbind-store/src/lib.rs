//! DocBind Store - Document-store backends and bootstrap
//!
//! Provides:
//! - `MemoryStore`: mutex-guarded in-memory backend for tests and
//!   ephemeral use
//! - `SqliteStore`: SQLite-backed document tables (one table per logical
//!   table name, records stored as JSON text, writes are upserts)
//! - Connection management for the SQLite backend
//! - `StoreConfig` with redacted credentials
//! - `SharedStoreClient`: the guarded, lazily-initialized process-wide
//!   client handle

pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod memory;
pub mod sqlite;

// Re-export key types
pub use client::{ClientFactory, MemoryFactory, SharedStoreClient, SqliteFactory, TableSpec};
pub use config::StoreConfig;
pub use errors::Result;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
