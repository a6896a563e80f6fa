//! Schema descriptors, the model catalogue, and record codecs
//!
//! Schemas are runtime data: an external interface-description format
//! declares each model's fields, and the normalizer interprets those
//! declarations recursively. The descriptor itself is a closed tagged
//! union, not free-form introspection.

pub mod catalogue;
pub mod codec;
pub mod descriptor;
pub mod model;

pub use catalogue::SchemaCatalogue;
pub use codec::{RecordCodec, SchemaCodec};
pub use descriptor::{Descriptor, PrimitiveKind};
pub use model::ModelSchema;
