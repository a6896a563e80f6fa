//! Field type descriptors
//!
//! Each field of a model is described by exactly one `Descriptor`:
//! a primitive scalar, a reference to another model (a nested mapping),
//! or an array of a primitive or reference element.

use serde::{Deserialize, Serialize};

/// The primitive scalar types a schema can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Number,
    Integer,
    String,
}

impl PrimitiveKind {
    /// Schema-facing name of this primitive
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::String => "string",
        }
    }
}

/// Declarative description of one field's type
///
/// Arrays of arrays are representable but rejected at normalization time;
/// the catalogue does not forbid constructing them so that the failure
/// surfaces as the documented `NotImplemented` error rather than a panic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Descriptor {
    /// A scalar field
    Primitive(PrimitiveKind),
    /// A nested mapping conforming to the named model's schema
    Reference(String),
    /// An ordered sequence of elements described by the inner descriptor
    Array(Box<Descriptor>),
}

impl Descriptor {
    pub fn boolean() -> Self {
        Descriptor::Primitive(PrimitiveKind::Boolean)
    }

    pub fn number() -> Self {
        Descriptor::Primitive(PrimitiveKind::Number)
    }

    pub fn integer() -> Self {
        Descriptor::Primitive(PrimitiveKind::Integer)
    }

    pub fn string() -> Self {
        Descriptor::Primitive(PrimitiveKind::String)
    }

    pub fn reference(model: impl Into<String>) -> Self {
        Descriptor::Reference(model.into())
    }

    pub fn array(element: Descriptor) -> Self {
        Descriptor::Array(Box::new(element))
    }

    /// Raw shape this descriptor expects, for error messages
    pub fn expected_shape(&self) -> &'static str {
        match self {
            Descriptor::Primitive(kind) => kind.name(),
            Descriptor::Reference(_) => "mapping",
            Descriptor::Array(_) => "sequence",
        }
    }
}
