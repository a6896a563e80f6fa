//! Typed record values
//!
//! `TypedValue` is the in-memory shape application code manipulates: the
//! output of normalization and the input to marshalling. A `TypedRecord`
//! is one model instance's worth of named typed values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One model instance: field name -> typed value, ordered by field name
pub type TypedRecord = BTreeMap<String, TypedValue>;

/// A value conforming to a schema descriptor
///
/// Variant order matters for untagged deserialization: integers must be
/// tried before floats so `3` lands in `Integer` and `3.5` in `Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Array(Vec<TypedValue>),
    Object(TypedRecord),
}

impl TypedValue {
    /// Short name of this value's shape, for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            TypedValue::Bool(_) => "boolean",
            TypedValue::Integer(_) => "integer",
            TypedValue::Number(_) => "number",
            TypedValue::Text(_) => "string",
            TypedValue::Array(_) => "sequence",
            TypedValue::Object(_) => "mapping",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Number(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&TypedRecord> {
        match self {
            TypedValue::Object(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        TypedValue::Integer(i)
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        TypedValue::Number(f)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::Text(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::Text(s)
    }
}
