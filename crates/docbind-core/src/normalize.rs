//! The Value Normalizer
//!
//! Recursively converts a raw stored record into the typed shape its model
//! schema declares. Pure functions: no I/O, inputs are never mutated, and
//! conversion is all-or-nothing per record.
//!
//! Scalar coercion is deliberately permissive in the boolean case: any raw
//! value normalizes by its truthiness (numbers by non-zero, strings and
//! containers by non-emptiness). Numbers and integers also accept their
//! store-native string encodings.

use crate::errors::{DocBindError, Result};
use crate::schema::{Descriptor, ModelSchema, PrimitiveKind, SchemaCatalogue};
use crate::store::{RawRecord, RawValue};
use crate::value::{TypedRecord, TypedValue};

/// Normalize a whole raw record against the named model's schema
///
/// Every field present in the raw record must be declared by the model;
/// declared fields absent from the raw record are simply omitted from the
/// output (no defaulting).
///
/// # Errors
///
/// - `UnknownModel` if the model is not in the catalogue
/// - `UnknownField` if the raw record carries an undeclared field
/// - `SchemaMismatch` if any value's shape disagrees with its descriptor
/// - `NotImplemented` if an array-of-array descriptor is encountered
pub fn normalize_record(
    catalogue: &SchemaCatalogue,
    model_name: &str,
    raw: &RawRecord,
) -> Result<TypedRecord> {
    let schema = catalogue.model(model_name)?;
    normalize_against_schema(catalogue, &schema, raw)
}

fn normalize_against_schema(
    catalogue: &SchemaCatalogue,
    schema: &ModelSchema,
    raw: &RawRecord,
) -> Result<TypedRecord> {
    let mut record = TypedRecord::new();
    for (field, value) in raw {
        let descriptor = schema
            .property(field)
            .ok_or_else(|| DocBindError::UnknownField {
                model: schema.name().to_string(),
                field: field.clone(),
            })?;
        record.insert(
            field.clone(),
            normalize_value(catalogue, field, descriptor, value)?,
        );
    }
    Ok(record)
}

/// Normalize a single raw value against its descriptor
///
/// `field` is carried for error context only.
pub fn normalize_value(
    catalogue: &SchemaCatalogue,
    field: &str,
    descriptor: &Descriptor,
    raw: &RawValue,
) -> Result<TypedValue> {
    match descriptor {
        Descriptor::Primitive(kind) => normalize_primitive(field, *kind, raw),
        Descriptor::Reference(model) => normalize_reference(catalogue, field, model, raw),
        Descriptor::Array(element) => normalize_array(catalogue, field, element, raw),
    }
}

fn normalize_primitive(field: &str, kind: PrimitiveKind, raw: &RawValue) -> Result<TypedValue> {
    match kind {
        PrimitiveKind::Boolean => Ok(TypedValue::Bool(truthiness(raw))),
        PrimitiveKind::Number => normalize_number(field, raw),
        PrimitiveKind::Integer => normalize_integer(field, raw),
        PrimitiveKind::String => match raw {
            RawValue::String(s) => Ok(TypedValue::Text(s.clone())),
            other => Err(mismatch(field, "string", other)),
        },
    }
}

/// Truthiness of a raw store value: numbers by non-zero, strings and
/// containers by non-emptiness. Store booleans may arrive as integers or
/// native booleans; both land here.
fn truthiness(raw: &RawValue) -> bool {
    match raw {
        RawValue::Null => false,
        RawValue::Bool(b) => *b,
        RawValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        RawValue::String(s) => !s.is_empty(),
        RawValue::Array(items) => !items.is_empty(),
        RawValue::Object(map) => !map.is_empty(),
    }
}

fn normalize_number(field: &str, raw: &RawValue) -> Result<TypedValue> {
    match raw {
        RawValue::Number(n) => n
            .as_f64()
            .map(TypedValue::Number)
            .ok_or_else(|| mismatch(field, "number", raw)),
        RawValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map(TypedValue::Number)
            .map_err(|_| mismatch(field, "number", raw)),
        RawValue::Bool(b) => Ok(TypedValue::Number(if *b { 1.0 } else { 0.0 })),
        other => Err(mismatch(field, "number", other)),
    }
}

fn normalize_integer(field: &str, raw: &RawValue) -> Result<TypedValue> {
    match raw {
        RawValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(TypedValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                // store decimals truncate toward zero
                Ok(TypedValue::Integer(f as i64))
            } else {
                Err(mismatch(field, "integer", raw))
            }
        }
        RawValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map(TypedValue::Integer)
            .map_err(|_| mismatch(field, "integer", raw)),
        RawValue::Bool(b) => Ok(TypedValue::Integer(i64::from(*b))),
        other => Err(mismatch(field, "integer", other)),
    }
}

fn normalize_reference(
    catalogue: &SchemaCatalogue,
    field: &str,
    model: &str,
    raw: &RawValue,
) -> Result<TypedValue> {
    let RawValue::Object(map) = raw else {
        return Err(mismatch(field, "mapping", raw));
    };
    tracing::debug!(model = model, field = field, "normalizing nested mapping");
    let schema = catalogue.model(model)?;
    let nested = normalize_against_schema(catalogue, &schema, map)?;
    Ok(TypedValue::Object(nested))
}

fn normalize_array(
    catalogue: &SchemaCatalogue,
    field: &str,
    element: &Descriptor,
    raw: &RawValue,
) -> Result<TypedValue> {
    if matches!(element, Descriptor::Array(_)) {
        return Err(DocBindError::NotImplemented {
            field: field.to_string(),
            reason: "arrays of arrays are not supported".to_string(),
        });
    }

    let RawValue::Array(items) = raw else {
        return Err(mismatch(field, "sequence", raw));
    };

    let normalized: Result<Vec<TypedValue>> = items
        .iter()
        .map(|item| normalize_value(catalogue, field, element, item))
        .collect();
    Ok(TypedValue::Array(normalized?))
}

fn mismatch(field: &str, expected: &str, actual: &RawValue) -> DocBindError {
    DocBindError::SchemaMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: raw_shape(actual).to_string(),
    }
}

/// Short name of a raw value's shape, for error messages
fn raw_shape(raw: &RawValue) -> &'static str {
    match raw {
        RawValue::Null => "null",
        RawValue::Bool(_) => "boolean",
        RawValue::Number(_) => "number",
        RawValue::String(_) => "string",
        RawValue::Array(_) => "sequence",
        RawValue::Object(_) => "mapping",
    }
}
