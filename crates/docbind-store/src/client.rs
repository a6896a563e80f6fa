//! Shared store client bootstrap
//!
//! The store client is a single shared, lazily-initialized resource.
//! `SharedStoreClient` guards the lazy check-and-set with a mutex so
//! concurrent first use constructs exactly one client and no partially
//! configured client is ever observed.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use docbind_core::store::StoreClient;

use crate::config::StoreConfig;
use crate::errors::{poisoned, Result};
use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;

/// Name and primary key field of one document table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub primary_key: String,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: primary_key.into(),
        }
    }
}

/// Constructs a store client from configuration
///
/// The factory is the opaque seam towards the real store: the engine
/// never constructs clients directly.
pub trait ClientFactory: Send + Sync {
    fn build(&self, config: &StoreConfig) -> Result<Arc<dyn StoreClient>>;
}

/// Factory for the in-memory backend
pub struct MemoryFactory {
    tables: Vec<TableSpec>,
}

impl MemoryFactory {
    pub fn new(tables: Vec<TableSpec>) -> Self {
        Self { tables }
    }
}

impl ClientFactory for MemoryFactory {
    fn build(&self, _config: &StoreConfig) -> Result<Arc<dyn StoreClient>> {
        let store = MemoryStore::new();
        for table in &self.tables {
            store.create_table(&table.name, &table.primary_key)?;
        }
        Ok(Arc::new(store))
    }
}

/// Factory for the SQLite backend
pub struct SqliteFactory {
    path: PathBuf,
    tables: Vec<TableSpec>,
}

impl SqliteFactory {
    pub fn new(path: impl Into<PathBuf>, tables: Vec<TableSpec>) -> Self {
        Self {
            path: path.into(),
            tables,
        }
    }
}

impl ClientFactory for SqliteFactory {
    fn build(&self, _config: &StoreConfig) -> Result<Arc<dyn StoreClient>> {
        let store = SqliteStore::open(&self.path)?;
        for table in &self.tables {
            store.create_table(&table.name, &table.primary_key)?;
        }
        Ok(Arc::new(store))
    }
}

/// Guarded, lazily-initialized shared client handle
pub struct SharedStoreClient {
    config: StoreConfig,
    factory: Box<dyn ClientFactory>,
    client: Mutex<Option<Arc<dyn StoreClient>>>,
}

impl SharedStoreClient {
    pub fn new(config: StoreConfig, factory: Box<dyn ClientFactory>) -> Self {
        Self {
            config,
            factory,
            client: Mutex::new(None),
        }
    }

    /// Get the shared client, constructing it on first use
    ///
    /// The mutex is held across the whole check-and-set, so a racing
    /// first use waits for the winner's fully-built client instead of
    /// building a second one.
    pub fn get_or_init(&self) -> Result<Arc<dyn StoreClient>> {
        let mut slot = self.client.lock().map_err(|_| poisoned("store client"))?;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        tracing::info!(
            region = %self.config.region,
            access_key_id = %self.config.access_key_id,
            secret_access_key = %self.config.secret_access_key,
            "document store client setup"
        );
        let client = self.factory.build(&self.config)?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Whether the client has been constructed yet
    pub fn is_initialized(&self) -> bool {
        self.client
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}
