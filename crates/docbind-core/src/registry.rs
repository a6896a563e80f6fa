//! The Persistent-Entity Registry
//!
//! An explicitly-owned mapping from model name to its resolved storage
//! binding. Configurations are declared at startup; bindings are resolved
//! lazily on first use and cached for the process lifetime. Steady-state
//! lookups take only the read lock; the write lock is touched solely on a
//! model's first bind.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::binding::{BindingConfig, EntityBinding};
use crate::errors::{DocBindError, Result};
use crate::schema::SchemaCatalogue;

/// Model name -> declared config and resolved binding
#[derive(Default)]
pub struct BindingRegistry {
    configs: RwLock<HashMap<String, BindingConfig>>,
    bindings: RwLock<HashMap<String, Arc<EntityBinding>>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a model's static binding configuration
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBinding` if the model already has a declaration.
    pub fn declare(&self, config: BindingConfig) -> Result<()> {
        let mut configs = self
            .configs
            .write()
            .map_err(|_| poisoned("binding configs"))?;
        if configs.contains_key(&config.model_name) {
            return Err(DocBindError::DuplicateBinding {
                model: config.model_name.clone(),
            });
        }
        configs.insert(config.model_name.clone(), config);
        Ok(())
    }

    /// Resolve (or return the cached) binding for a model
    ///
    /// The first call for a model validates its configuration, resolves
    /// the schema, caches the binding, and logs the initialization. Every
    /// later call returns the same `Arc` unchanged. Racing first-touch
    /// callers are serialized by the write lock and re-check under it, so
    /// a model binds exactly once.
    ///
    /// # Errors
    ///
    /// - `UndeclaredBinding` if no configuration was declared
    /// - `MissingBindingAttribute` for an empty required attribute
    /// - `UnknownModel` if the catalogue has no such model
    pub fn ensure_bound(
        &self,
        model_name: &str,
        catalogue: &SchemaCatalogue,
    ) -> Result<Arc<EntityBinding>> {
        if let Some(binding) = self
            .bindings
            .read()
            .map_err(|_| poisoned("binding registry"))?
            .get(model_name)
        {
            return Ok(binding.clone());
        }

        let mut bindings = self
            .bindings
            .write()
            .map_err(|_| poisoned("binding registry"))?;
        // another caller may have bound the model while we waited
        if let Some(binding) = bindings.get(model_name) {
            return Ok(binding.clone());
        }

        let config = self
            .configs
            .read()
            .map_err(|_| poisoned("binding configs"))?
            .get(model_name)
            .cloned()
            .ok_or_else(|| DocBindError::UndeclaredBinding {
                model: model_name.to_string(),
            })?;

        let binding = Arc::new(EntityBinding::resolve(&config, catalogue)?);
        tracing::info!(
            api = binding.api_name(),
            model = binding.model_name(),
            table = binding.table_name(),
            primary_key = binding.primary_key(),
            "initialized persistent entity binding"
        );
        bindings.insert(model_name.to_string(), binding.clone());
        Ok(binding)
    }

    /// Whether a model has already been bound
    pub fn is_bound(&self, model_name: &str) -> bool {
        self.bindings
            .read()
            .map(|bindings| bindings.contains_key(model_name))
            .unwrap_or(false)
    }
}

fn poisoned(resource: &str) -> DocBindError {
    DocBindError::LockPoisoned {
        resource: resource.to_string(),
    }
}
