//! Persistent-entity bindings
//!
//! A binding is the resolved association between a model and its storage
//! location: table name, primary key field, and schema reference. The
//! static side (`BindingConfig`) is declared in code at startup; the
//! resolved side (`EntityBinding`) is produced once per model by the
//! registry and never changes afterwards.

use std::sync::Arc;

use crate::errors::{DocBindError, Result};
use crate::schema::{ModelSchema, SchemaCatalogue};

/// Static per-model storage configuration, declared once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    /// Name of the API the model's schema belongs to
    pub api_name: String,
    /// Model name, as registered in the schema catalogue
    pub model_name: String,
    /// Storage table identifier
    pub table_name: String,
    /// Name of the primary key field
    pub primary_key: String,
}

impl BindingConfig {
    pub fn new(
        api_name: impl Into<String>,
        model_name: impl Into<String>,
        table_name: impl Into<String>,
        primary_key: impl Into<String>,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            model_name: model_name.into(),
            table_name: table_name.into(),
            primary_key: primary_key.into(),
        }
    }
}

/// Resolved storage binding for one model
///
/// Immutable once created; shared behind an `Arc` by the registry.
#[derive(Debug, Clone)]
pub struct EntityBinding {
    config: BindingConfig,
    schema: Arc<ModelSchema>,
}

impl EntityBinding {
    /// Resolve a binding from its static configuration
    ///
    /// Every required attribute must be non-empty; a missing attribute is
    /// a programming-time contract violation, surfaced immediately and
    /// treated as fatal by callers.
    ///
    /// # Errors
    ///
    /// - `MissingBindingAttribute` for an empty required attribute
    /// - `UnknownModel` if the schema catalogue has no such model
    pub fn resolve(config: &BindingConfig, catalogue: &SchemaCatalogue) -> Result<Self> {
        for (attribute, value) in [
            ("api_name", &config.api_name),
            ("model_name", &config.model_name),
            ("table_name", &config.table_name),
            ("primary_key", &config.primary_key),
        ] {
            if value.trim().is_empty() {
                return Err(DocBindError::MissingBindingAttribute {
                    model: config.model_name.clone(),
                    attribute: attribute.to_string(),
                });
            }
        }

        let schema = catalogue.model(&config.model_name)?;
        Ok(Self {
            config: config.clone(),
            schema,
        })
    }

    pub fn api_name(&self) -> &str {
        &self.config.api_name
    }

    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }

    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    pub fn primary_key(&self) -> &str {
        &self.config.primary_key
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }
}
