//! The schema catalogue
//!
//! A startup-time table mapping model names to their schemas and record
//! codecs. Registration happens once while the application context is
//! being built (`&mut self`); afterwards the catalogue is shared behind an
//! `Arc` and only read, so steady-state lookups take no lock.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{DocBindError, Result};

use super::codec::{RecordCodec, SchemaCodec};
use super::descriptor::Descriptor;
use super::model::ModelSchema;

/// Model name -> {schema, codec}
#[derive(Default)]
pub struct SchemaCatalogue {
    models: HashMap<String, Arc<ModelSchema>>,
    codecs: HashMap<String, Arc<dyn RecordCodec>>,
}

impl SchemaCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model schema, installing the default schema-driven codec
    ///
    /// # Errors
    ///
    /// Returns `DuplicateModel` if the name is already registered.
    pub fn register(&mut self, schema: ModelSchema) -> Result<()> {
        let name = schema.name().to_string();
        if self.models.contains_key(&name) {
            return Err(DocBindError::DuplicateModel { model: name });
        }

        let schema = Arc::new(schema);
        self.codecs
            .insert(name.clone(), Arc::new(SchemaCodec::new(schema.clone())));
        self.models.insert(name, schema);
        Ok(())
    }

    /// Override the codec for an already-registered model
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if the model has not been registered.
    pub fn register_codec(&mut self, model: &str, codec: Arc<dyn RecordCodec>) -> Result<()> {
        if !self.models.contains_key(model) {
            return Err(DocBindError::UnknownModel {
                model: model.to_string(),
            });
        }
        self.codecs.insert(model.to_string(), codec);
        Ok(())
    }

    /// Look up a model's schema
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if the name has no entry.
    pub fn model(&self, name: &str) -> Result<Arc<ModelSchema>> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| DocBindError::UnknownModel {
                model: name.to_string(),
            })
    }

    /// Look up a model's record codec
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if the name has no entry.
    pub fn codec(&self, name: &str) -> Result<Arc<dyn RecordCodec>> {
        self.codecs
            .get(name)
            .cloned()
            .ok_or_else(|| DocBindError::UnknownModel {
                model: name.to_string(),
            })
    }

    /// Whether a model is registered
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Verify that every reference in every registered schema resolves
    ///
    /// Models may reference each other (including themselves), so this
    /// runs once after all registrations rather than per `register` call.
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` naming the first unresolved reference.
    pub fn validate(&self) -> Result<()> {
        for schema in self.models.values() {
            for (_, descriptor) in schema.properties() {
                self.validate_descriptor(descriptor)?;
            }
        }
        Ok(())
    }

    fn validate_descriptor(&self, descriptor: &Descriptor) -> Result<()> {
        match descriptor {
            Descriptor::Primitive(_) => Ok(()),
            Descriptor::Reference(model) => {
                if self.models.contains_key(model) {
                    Ok(())
                } else {
                    Err(DocBindError::UnknownModel {
                        model: model.clone(),
                    })
                }
            }
            Descriptor::Array(element) => self.validate_descriptor(element),
        }
    }
}
