// Integration tests for the load/save lifecycle over the in-memory
// backend: round trips, typed not-found failures, idempotent binding,
// lazy client construction, and the entity save capability.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docbind_core::binding::BindingConfig;
use docbind_core::errors::{DbErrorKind, DocBindError};
use docbind_core::registry::BindingRegistry;
use docbind_core::schema::{Descriptor, ModelSchema, SchemaCatalogue};
use docbind_core::store::StoreClient;
use docbind_core::value::{TypedRecord, TypedValue};
use docbind_engine::Db;
use docbind_store::{
    ClientFactory, MemoryFactory, Result, SharedStoreClient, StoreConfig, TableSpec,
};

fn catalogue() -> SchemaCatalogue {
    let mut catalogue = SchemaCatalogue::new();
    catalogue
        .register(
            ModelSchema::new("Customer")
                .with_property("name", Descriptor::string())
                .with_property("age", Descriptor::integer()),
        )
        .unwrap();
    catalogue
        .register(ModelSchema::new("Item").with_property("qty", Descriptor::integer()))
        .unwrap();
    catalogue
        .register(
            ModelSchema::new("Order")
                .with_property("order_id", Descriptor::string())
                .with_property("total", Descriptor::number())
                .with_property("paid", Descriptor::boolean())
                .with_property("customer", Descriptor::reference("Customer"))
                .with_property("tags", Descriptor::array(Descriptor::string()))
                .with_property("items", Descriptor::array(Descriptor::reference("Item"))),
        )
        .unwrap();
    catalogue
}

fn registry() -> BindingRegistry {
    let registry = BindingRegistry::new();
    registry
        .declare(BindingConfig::new("shop", "Order", "orders", "order_id"))
        .unwrap();
    registry
}

fn tables() -> Vec<TableSpec> {
    vec![TableSpec::new("orders", "order_id")]
}

fn memory_db() -> Db {
    let store = SharedStoreClient::new(
        StoreConfig::new("local", "test", "test"),
        Box::new(MemoryFactory::new(tables())),
    );
    Db::new(catalogue(), registry(), store).unwrap()
}

fn order(id: &str) -> TypedRecord {
    let mut customer = TypedRecord::new();
    customer.insert("name".into(), TypedValue::Text("Ann".into()));
    customer.insert("age".into(), TypedValue::Integer(30));

    let mut item = TypedRecord::new();
    item.insert("qty".into(), TypedValue::Integer(2));

    let mut record = TypedRecord::new();
    record.insert("order_id".into(), TypedValue::Text(id.into()));
    record.insert("total".into(), TypedValue::Number(19.5));
    record.insert("paid".into(), TypedValue::Bool(true));
    record.insert("customer".into(), TypedValue::Object(customer));
    record.insert(
        "tags".into(),
        TypedValue::Array(vec![
            TypedValue::Text("a".into()),
            TypedValue::Text("b".into()),
        ]),
    );
    record.insert(
        "items".into(),
        TypedValue::Array(vec![TypedValue::Object(item)]),
    );
    record
}

// ---------------------------------------------------------------------------
// load / save
// ---------------------------------------------------------------------------

#[test]
fn test_save_then_load_round_trips() {
    let db = memory_db();
    let record = order("o-1");

    db.save("Order", &record).unwrap();
    let entity = db.load("Order", "o-1").unwrap();

    assert_eq!(entity.model_name(), "Order");
    assert_eq!(entity.record(), &record);
}

#[test]
fn test_load_missing_key_fails_not_found() {
    let db = memory_db();

    let err = db.load("Order", "absent-key").unwrap_err();
    assert_eq!(
        err,
        DocBindError::ItemNotFound {
            table: "orders".to_string(),
            primary_key: "order_id".to_string(),
            key: "absent-key".to_string(),
        }
    );
    assert_eq!(err.kind(), DbErrorKind::NotFound);
}

#[test]
fn test_save_binds_lazily_without_prior_load() {
    let db = memory_db();
    assert!(!db.registry().is_bound("Order"));

    db.save("Order", &order("o-1")).unwrap();
    assert!(db.registry().is_bound("Order"));
}

#[test]
fn test_last_writer_wins_on_same_key() {
    let db = memory_db();

    let mut first = order("o-1");
    first.insert("total".into(), TypedValue::Number(10.0));
    let mut second = order("o-1");
    second.insert("total".into(), TypedValue::Number(99.0));

    db.save("Order", &first).unwrap();
    db.save("Order", &second).unwrap();

    let entity = db.load("Order", "o-1").unwrap();
    assert_eq!(entity.get("total"), Some(&TypedValue::Number(99.0)));
}

// ---------------------------------------------------------------------------
// entity save capability
// ---------------------------------------------------------------------------

#[test]
fn test_entity_saves_itself_after_mutation() {
    let db = memory_db();
    db.save("Order", &order("o-1")).unwrap();

    let mut entity = db.load("Order", "o-1").unwrap();
    entity.set("paid", TypedValue::Bool(false));
    entity.save().unwrap();

    let reloaded = db.load("Order", "o-1").unwrap();
    assert_eq!(reloaded.get("paid"), Some(&TypedValue::Bool(false)));
}

#[test]
fn test_into_record_keeps_field_values() {
    let db = memory_db();
    db.save("Order", &order("o-7")).unwrap();

    let entity = db.load("Order", "o-7").unwrap();
    let record = entity.into_record();
    assert_eq!(record["order_id"], TypedValue::Text("o-7".into()));
}

// ---------------------------------------------------------------------------
// binding
// ---------------------------------------------------------------------------

#[test]
fn test_ensure_bound_is_idempotent_across_operations() {
    let db = memory_db();
    db.save("Order", &order("o-1")).unwrap();

    let first = db.registry().ensure_bound("Order", db.catalogue()).unwrap();
    db.load("Order", "o-1").unwrap();
    let second = db.registry().ensure_bound("Order", db.catalogue()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_table_name_resolves_through_binding() {
    let db = memory_db();
    assert_eq!(db.table_name("Order").unwrap(), "orders");
}

#[test]
fn test_missing_binding_attribute_fails_fast() {
    let registry = BindingRegistry::new();
    registry
        .declare(BindingConfig::new("shop", "Order", "", "order_id"))
        .unwrap();
    let store = SharedStoreClient::new(
        StoreConfig::new("local", "test", "test"),
        Box::new(MemoryFactory::new(tables())),
    );
    let db = Db::new(catalogue(), registry, store).unwrap();

    let err = db.save("Order", &order("o-1")).unwrap_err();
    assert_eq!(
        err,
        DocBindError::MissingBindingAttribute {
            model: "Order".to_string(),
            attribute: "table_name".to_string(),
        }
    );
    assert_eq!(err.kind(), DbErrorKind::Configuration);
}

#[test]
fn test_binding_declared_for_unregistered_model_fails() {
    let registry = registry();
    registry
        .declare(BindingConfig::new("shop", "Ghost", "ghosts", "id"))
        .unwrap();
    let store = SharedStoreClient::new(
        StoreConfig::new("local", "test", "test"),
        Box::new(MemoryFactory::new(tables())),
    );
    let db = Db::new(catalogue(), registry, store).unwrap();

    let err = db.load("Ghost", "g-1").unwrap_err();
    assert_eq!(
        err,
        DocBindError::UnknownModel {
            model: "Ghost".to_string()
        }
    );
}

#[test]
fn test_undeclared_model_fails() {
    let db = memory_db();

    let err = db.load("Customer", "c-1").unwrap_err();
    assert_eq!(
        err,
        DocBindError::UndeclaredBinding {
            model: "Customer".to_string()
        }
    );
}

// ---------------------------------------------------------------------------
// shared client
// ---------------------------------------------------------------------------

struct CountingFactory {
    inner: MemoryFactory,
    builds: Arc<AtomicUsize>,
}

impl ClientFactory for CountingFactory {
    fn build(&self, config: &StoreConfig) -> Result<Arc<dyn StoreClient>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.inner.build(config)
    }
}

#[test]
fn test_store_client_constructed_once_across_operations() {
    let builds = Arc::new(AtomicUsize::new(0));
    let store = SharedStoreClient::new(
        StoreConfig::new("local", "test", "test"),
        Box::new(CountingFactory {
            inner: MemoryFactory::new(tables()),
            builds: builds.clone(),
        }),
    );
    let db = Db::new(catalogue(), registry(), store).unwrap();

    db.save("Order", &order("o-1")).unwrap();
    db.load("Order", "o-1").unwrap();
    db.save("Order", &order("o-2")).unwrap();
    db.load("Order", "o-2").unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
}
