//! Named model schemas
//!
//! A `ModelSchema` is the immutable set of field descriptors for one named
//! model. Built once at startup, then shared read-only for the process
//! lifetime.

use std::collections::BTreeMap;

use super::descriptor::Descriptor;

/// Field descriptors for one named model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: String,
    properties: BTreeMap<String, Descriptor>,
}

impl ModelSchema {
    /// Start an empty schema for the named model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add a field descriptor (builder style; last declaration wins)
    pub fn with_property(mut self, field: impl Into<String>, descriptor: Descriptor) -> Self {
        self.properties.insert(field.into(), descriptor);
        self
    }

    /// The model's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up one field's descriptor
    pub fn property(&self, field: &str) -> Option<&Descriptor> {
        self.properties.get(field)
    }

    /// Iterate all declared properties in field-name order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the model declares no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let schema = ModelSchema::new("Customer")
            .with_property("name", Descriptor::string())
            .with_property("age", Descriptor::integer());

        assert_eq!(schema.name(), "Customer");
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.property("age"), Some(&Descriptor::integer()));
        assert_eq!(schema.property("missing"), None);
    }

    #[test]
    fn test_properties_iterate_in_field_order() {
        let schema = ModelSchema::new("M")
            .with_property("b", Descriptor::string())
            .with_property("a", Descriptor::integer());

        let fields: Vec<&str> = schema.properties().map(|(k, _)| k).collect();
        assert_eq!(fields, vec!["a", "b"]);
    }
}
