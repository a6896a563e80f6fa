//! The entity handle
//!
//! `load` returns an `Entity`: the typed record paired with its resolved
//! binding and the store client that produced it. The pairing is what
//! grants the save capability; callers never re-specify the model to
//! persist a loaded record.

use std::sync::Arc;

use docbind_core::binding::EntityBinding;
use docbind_core::errors::Result;
use docbind_core::schema::SchemaCatalogue;
use docbind_core::store::StoreClient;
use docbind_core::value::{TypedRecord, TypedValue};

use crate::ops;

/// A loaded record with its save capability attached
pub struct Entity {
    record: TypedRecord,
    binding: Arc<EntityBinding>,
    catalogue: Arc<SchemaCatalogue>,
    client: Arc<dyn StoreClient>,
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("record", &self.record)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl Entity {
    pub(crate) fn new(
        record: TypedRecord,
        binding: Arc<EntityBinding>,
        catalogue: Arc<SchemaCatalogue>,
        client: Arc<dyn StoreClient>,
    ) -> Self {
        Self {
            record,
            binding,
            catalogue,
            client,
        }
    }

    /// Name of the model this entity conforms to
    pub fn model_name(&self) -> &str {
        self.binding.model_name()
    }

    /// The typed record
    pub fn record(&self) -> &TypedRecord {
        &self.record
    }

    /// Mutable access for in-place edits before saving
    pub fn record_mut(&mut self) -> &mut TypedRecord {
        &mut self.record
    }

    /// Consume the handle, keeping only the record
    pub fn into_record(self) -> TypedRecord {
        self.record
    }

    /// Convenience field lookup
    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.record.get(field)
    }

    /// Set a field value, returning the previous one if any
    pub fn set(&mut self, field: impl Into<String>, value: TypedValue) -> Option<TypedValue> {
        self.record.insert(field.into(), value)
    }

    /// Persist this record back to its table (full item replacement)
    pub fn save(&self) -> Result<()> {
        ops::save_bound(&self.catalogue, &self.binding, self.client.as_ref(), &self.record)
    }
}
