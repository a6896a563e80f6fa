//! Per-model record codecs
//!
//! The catalogue owns the canonical conversion between typed records and
//! the raw mapping the store accepts. `SchemaCodec` is the default,
//! schema-driven pair; callers may register a custom codec per model at
//! startup instead.

use std::sync::Arc;

use serde_json::Number;

use crate::errors::{DocBindError, Result};
use crate::store::{RawRecord, RawValue};
use crate::value::{TypedRecord, TypedValue};

use super::descriptor::{Descriptor, PrimitiveKind};
use super::model::ModelSchema;

/// Encode/decode pair for one model
///
/// `encode` is the marshal direction: typed record -> raw mapping, already
/// in store-acceptable scalar shapes, with no further coercion downstream.
/// `decode` is the typed-object construction hook applied to the
/// normalizer's output before it is handed to the caller.
pub trait RecordCodec: Send + Sync {
    fn encode(&self, record: &TypedRecord) -> Result<RawRecord>;
    fn decode(&self, record: TypedRecord) -> Result<TypedRecord>;
}

/// Default codec, driven entirely by the model's schema
pub struct SchemaCodec {
    schema: Arc<ModelSchema>,
}

impl SchemaCodec {
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self { schema }
    }

    /// Check that a typed value has the shape its descriptor declares.
    ///
    /// Reference fields are checked one level deep; the nested fields were
    /// already normalized against the referenced model, so only the
    /// mapping shape itself needs confirming here.
    fn conforms(descriptor: &Descriptor, value: &TypedValue) -> bool {
        match (descriptor, value) {
            (Descriptor::Primitive(PrimitiveKind::Boolean), TypedValue::Bool(_)) => true,
            (Descriptor::Primitive(PrimitiveKind::Integer), TypedValue::Integer(_)) => true,
            (Descriptor::Primitive(PrimitiveKind::Number), TypedValue::Number(_)) => true,
            (Descriptor::Primitive(PrimitiveKind::String), TypedValue::Text(_)) => true,
            (Descriptor::Reference(_), TypedValue::Object(_)) => true,
            (Descriptor::Array(element), TypedValue::Array(items)) => {
                items.iter().all(|item| Self::conforms(element, item))
            }
            _ => false,
        }
    }
}

impl RecordCodec for SchemaCodec {
    fn encode(&self, record: &TypedRecord) -> Result<RawRecord> {
        let mut raw = RawRecord::new();
        for (field, value) in record {
            raw.insert(field.clone(), encode_value(value)?);
        }
        Ok(raw)
    }

    fn decode(&self, record: TypedRecord) -> Result<TypedRecord> {
        for (field, value) in &record {
            let descriptor = self.schema.property(field).ok_or_else(|| {
                DocBindError::UnknownField {
                    model: self.schema.name().to_string(),
                    field: field.clone(),
                }
            })?;
            if !Self::conforms(descriptor, value) {
                return Err(DocBindError::SchemaMismatch {
                    field: field.clone(),
                    expected: descriptor.expected_shape().to_string(),
                    actual: value.shape().to_string(),
                });
            }
        }
        Ok(record)
    }
}

/// Convert one typed value into its raw store shape
fn encode_value(value: &TypedValue) -> Result<RawValue> {
    match value {
        TypedValue::Bool(b) => Ok(RawValue::Bool(*b)),
        TypedValue::Integer(i) => Ok(RawValue::Number(Number::from(*i))),
        TypedValue::Number(f) => Number::from_f64(*f).map(RawValue::Number).ok_or_else(|| {
            DocBindError::Serialization {
                reason: format!("number {} has no store representation", f),
            }
        }),
        TypedValue::Text(s) => Ok(RawValue::String(s.clone())),
        TypedValue::Array(items) => {
            let encoded: Result<Vec<RawValue>> = items.iter().map(encode_value).collect();
            Ok(RawValue::Array(encoded?))
        }
        TypedValue::Object(record) => {
            let mut raw = RawRecord::new();
            for (field, nested) in record {
                raw.insert(field.clone(), encode_value(nested)?);
            }
            Ok(RawValue::Object(raw))
        }
    }
}
