//! The application context
//!
//! `Db` owns one schema catalogue, one binding registry, and one shared
//! store client, and every lifecycle operation goes through it. There is
//! no hidden process-wide state: applications construct a `Db` at startup
//! and pass it (or clone it; all internals are shared) wherever
//! persistence is needed.

use std::sync::Arc;

use docbind_core::errors::Result;
use docbind_core::registry::BindingRegistry;
use docbind_core::schema::SchemaCatalogue;
use docbind_core::value::TypedRecord;
use docbind_store::SharedStoreClient;

use crate::entity::Entity;
use crate::ops;

/// Application context for lifecycle operations
#[derive(Clone)]
pub struct Db {
    catalogue: Arc<SchemaCatalogue>,
    registry: Arc<BindingRegistry>,
    store: Arc<SharedStoreClient>,
}

impl Db {
    /// Build a context from its three collaborators
    ///
    /// Validates the catalogue (every schema reference must resolve)
    /// before anything can be loaded through it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if any registered schema references an
    /// unregistered model.
    pub fn new(
        catalogue: SchemaCatalogue,
        registry: BindingRegistry,
        store: SharedStoreClient,
    ) -> Result<Self> {
        catalogue.validate()?;
        Ok(Self {
            catalogue: Arc::new(catalogue),
            registry: Arc::new(registry),
            store: Arc::new(store),
        })
    }

    pub fn catalogue(&self) -> &SchemaCatalogue {
        &self.catalogue
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub(crate) fn catalogue_arc(&self) -> Arc<SchemaCatalogue> {
        self.catalogue.clone()
    }

    pub(crate) fn store(&self) -> &SharedStoreClient {
        &self.store
    }

    /// Load one record by primary key
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the store holds no record for the key;
    /// normalization and binding failures surface unchanged.
    pub fn load(&self, model_name: &str, key: &str) -> Result<Entity> {
        ops::load(self, model_name, key)
    }

    /// Save one record as a full item replacement (upsert)
    ///
    /// Binds the model lazily if this is its first use.
    pub fn save(&self, model_name: &str, record: &TypedRecord) -> Result<()> {
        ops::save(self, model_name, record)
    }

    /// Resolved storage table for a model, binding it lazily if needed
    pub fn table_name(&self, model_name: &str) -> Result<String> {
        let binding = self.registry.ensure_bound(model_name, &self.catalogue)?;
        Ok(binding.table_name().to_string())
    }
}
