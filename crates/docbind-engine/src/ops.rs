//! Lifecycle operations
//!
//! `load` and `save` are each a single point operation against the store:
//! no retries, no ordering guarantees across keys, last writer wins on a
//! key. Both log canonical start/end/error events with their duration.

use std::time::Instant;

use docbind_core::binding::EntityBinding;
use docbind_core::errors::{DocBindError, Result};
use docbind_core::marshal::marshal_record;
use docbind_core::normalize::normalize_record;
use docbind_core::schema::SchemaCatalogue;
use docbind_core::store::{ItemKey, StoreClient};
use docbind_core::value::TypedRecord;
use docbind_core::{log_op_end, log_op_error, log_op_start};
use docbind_core_types::RequestContext;

use crate::context::Db;
use crate::entity::Entity;

/// Load one record by primary key and attach its save capability
pub fn load(db: &Db, model_name: &str, key: &str) -> Result<Entity> {
    let start = Instant::now();
    let ctx = RequestContext::new();
    log_op_start!(
        "load",
        model = model_name,
        key = key,
        request_id = %ctx.request_id
    );

    match load_inner(db, model_name, key) {
        Ok(entity) => {
            log_op_end!(
                "load",
                duration_ms = start.elapsed().as_millis() as u64,
                model = model_name,
                key = key
            );
            Ok(entity)
        }
        Err(err) => {
            log_op_error!(
                "load",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                model = model_name,
                key = key
            );
            Err(err)
        }
    }
}

fn load_inner(db: &Db, model_name: &str, key: &str) -> Result<Entity> {
    let binding = db.registry().ensure_bound(model_name, db.catalogue())?;
    let client = db.store().get_or_init()?;

    let item_key = ItemKey::new(binding.primary_key(), key);
    let raw = client
        .get_item(binding.table_name(), &item_key)?
        .ok_or_else(|| DocBindError::ItemNotFound {
            table: binding.table_name().to_string(),
            primary_key: binding.primary_key().to_string(),
            key: key.to_string(),
        })?;

    let record = normalize_record(db.catalogue(), model_name, &raw)?;
    let record = db.catalogue().codec(model_name)?.decode(record)?;

    tracing::info!(
        model = model_name,
        table = binding.table_name(),
        key = key,
        "loaded record"
    );
    Ok(Entity::new(
        record,
        binding,
        db.catalogue_arc(),
        client,
    ))
}

/// Save one record, binding the model lazily if needed
pub fn save(db: &Db, model_name: &str, record: &TypedRecord) -> Result<()> {
    let start = Instant::now();
    let ctx = RequestContext::new();
    log_op_start!(
        "save",
        model = model_name,
        request_id = %ctx.request_id
    );

    let result = db
        .registry()
        .ensure_bound(model_name, db.catalogue())
        .and_then(|binding| {
            let client = db.store().get_or_init()?;
            save_bound(db.catalogue(), &binding, client.as_ref(), record)
        });

    match result {
        Ok(()) => {
            log_op_end!(
                "save",
                duration_ms = start.elapsed().as_millis() as u64,
                model = model_name
            );
            Ok(())
        }
        Err(err) => {
            log_op_error!(
                "save",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                model = model_name
            );
            Err(err)
        }
    }
}

/// Marshal and upsert against an already-resolved binding
pub(crate) fn save_bound(
    catalogue: &SchemaCatalogue,
    binding: &EntityBinding,
    client: &dyn StoreClient,
    record: &TypedRecord,
) -> Result<()> {
    let raw = marshal_record(catalogue, binding.model_name(), record)?;
    tracing::debug!(
        model = binding.model_name(),
        table = binding.table_name(),
        "storing record"
    );
    client.put_item(binding.table_name(), &raw)
}
