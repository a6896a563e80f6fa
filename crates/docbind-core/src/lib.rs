//! DocBind Core - Schema-driven value normalization and marshalling
//!
//! This crate provides the algorithmic heart of DocBind:
//! - Schema descriptors and the model catalogue (the startup-time table
//!   of model name -> field descriptors + record codec)
//! - Typed record values and the recursive Value Normalizer
//! - The Object Marshaller (typed record -> raw store mapping)
//! - Persistent-entity bindings and the explicitly-owned BindingRegistry
//! - The `StoreClient` seam the engine talks to the store through
//! - Canonical error and logging facilities

pub mod binding;
pub mod errors;
pub mod logging_facility;
pub mod marshal;
pub mod normalize;
pub mod registry;
pub mod schema;
pub mod store;
pub mod value;

// Re-export commonly used types
pub use binding::{BindingConfig, EntityBinding};
pub use errors::{DbError, DbErrorKind, DocBindError, Result};
pub use marshal::marshal_record;
pub use normalize::{normalize_record, normalize_value};
pub use registry::BindingRegistry;
pub use schema::{Descriptor, ModelSchema, PrimitiveKind, RecordCodec, SchemaCatalogue};
pub use store::{ItemKey, RawRecord, RawValue, StoreClient};
pub use value::{TypedRecord, TypedValue};
