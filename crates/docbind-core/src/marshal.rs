//! The Object Marshaller
//!
//! The inverse of normalization: typed record -> raw store mapping. The
//! catalogue owns the canonical conversion, so this path only selects the
//! model's registered codec and invokes it; the resulting mapping is
//! handed to the store write path unchanged, with no further coercion.

use crate::errors::Result;
use crate::schema::SchemaCatalogue;
use crate::store::RawRecord;
use crate::value::TypedRecord;

/// Marshal a typed record into the raw mapping the store accepts
///
/// # Errors
///
/// Returns `UnknownModel` if the model is not registered, or whatever the
/// model's codec reports.
pub fn marshal_record(
    catalogue: &SchemaCatalogue,
    model_name: &str,
    record: &TypedRecord,
) -> Result<RawRecord> {
    let codec = catalogue.codec(model_name)?;
    codec.encode(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DocBindError;
    use crate::normalize::normalize_record;
    use crate::schema::{Descriptor, ModelSchema};
    use crate::value::TypedValue;

    fn catalogue() -> SchemaCatalogue {
        let mut catalogue = SchemaCatalogue::new();
        catalogue
            .register(
                ModelSchema::new("User")
                    .with_property("name", Descriptor::string())
                    .with_property("age", Descriptor::integer())
                    .with_property("active", Descriptor::boolean()),
            )
            .unwrap();
        catalogue
    }

    #[test]
    fn test_marshal_unknown_model_fails() {
        let c = catalogue();
        let err = marshal_record(&c, "Ghost", &TypedRecord::new()).unwrap_err();
        assert!(matches!(err, DocBindError::UnknownModel { .. }));
    }

    #[test]
    fn test_marshal_then_normalize_round_trips() {
        let c = catalogue();
        let mut record = TypedRecord::new();
        record.insert("name".into(), TypedValue::Text("Ann".into()));
        record.insert("age".into(), TypedValue::Integer(30));
        record.insert("active".into(), TypedValue::Bool(false));

        let raw = marshal_record(&c, "User", &record).unwrap();
        let back = normalize_record(&c, "User", &raw).unwrap();
        assert_eq!(back, record);
    }

    mod round_trip_property {
        use super::*;
        use crate::value::TypedRecord;
        use proptest::prelude::*;

        fn full_catalogue() -> SchemaCatalogue {
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
                        .with_property(
                            "items",
                            Descriptor::array(Descriptor::reference("Item")),
                        ),
                )
                .unwrap();
            catalogue
        }

        fn order_strategy() -> impl Strategy<Value = TypedRecord> {
            (
                "[a-z0-9-]{1,12}",
                -1.0e9..1.0e9f64,
                any::<bool>(),
                ("[A-Za-z ]{0,10}", any::<i64>()),
                proptest::collection::vec("[a-z]{0,8}", 0..4),
                proptest::collection::vec(any::<i64>(), 0..4),
            )
                .prop_map(|(order_id, total, paid, (name, age), tags, qtys)| {
                    let mut customer = TypedRecord::new();
                    customer.insert("name".into(), TypedValue::Text(name));
                    customer.insert("age".into(), TypedValue::Integer(age));

                    let items = qtys
                        .into_iter()
                        .map(|qty| {
                            let mut item = TypedRecord::new();
                            item.insert("qty".into(), TypedValue::Integer(qty));
                            TypedValue::Object(item)
                        })
                        .collect();

                    let mut record = TypedRecord::new();
                    record.insert("order_id".into(), TypedValue::Text(order_id));
                    record.insert("total".into(), TypedValue::Number(total));
                    record.insert("paid".into(), TypedValue::Bool(paid));
                    record.insert("customer".into(), TypedValue::Object(customer));
                    record.insert(
                        "tags".into(),
                        TypedValue::Array(tags.into_iter().map(TypedValue::Text).collect()),
                    );
                    record.insert("items".into(), TypedValue::Array(items));
                    record
                })
        }

        proptest! {
            // marshal then normalize reproduces the record for every
            // supported descriptor shape
            #[test]
            fn test_marshal_normalize_identity(record in order_strategy()) {
                let c = full_catalogue();
                let raw = marshal_record(&c, "Order", &record).unwrap();
                let back = normalize_record(&c, "Order", &raw).unwrap();
                prop_assert_eq!(back, record);
            }
        }
    }
}
