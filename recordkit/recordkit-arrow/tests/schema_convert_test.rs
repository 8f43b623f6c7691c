use std::sync::Arc;

use arrow::datatypes::{DataType, Field, TimeUnit};
use recordkit_arrow::{ArrowConvertError, schema_to_arrow_schema};
use recordkit_core::{Entry, Schema, Type};

fn entry(name: &str, entry_type: Type, nullable: bool) -> Entry {
    Entry::builder()
        .with_name(name)
        .with_type(entry_type)
        .with_nullable(nullable)
        .build()
        .unwrap()
}

#[test]
fn schema_to_arrow_schema_converts_nested_types() {
    let address = Schema::builder()
        .with_entry(entry("city", Type::String, false))
        .with_entry(entry("zip", Type::Int, true))
        .build()
        .unwrap();
    let schema = Schema::builder()
        .with_entry(entry("s", Type::String, true))
        .with_entry(entry("i", Type::Int, false))
        .with_entry(entry("l", Type::Long, false))
        .with_entry(entry("f", Type::Float, false))
        .with_entry(entry("d", Type::Double, false))
        .with_entry(entry("b", Type::Boolean, false))
        .with_entry(entry("bytes", Type::Bytes, true))
        .with_entry(entry("at", Type::DateTime, true))
        .with_entry(
            Entry::builder()
                .with_name("tags")
                .with_type(Type::Array)
                .with_element_schema(Schema::of(Type::String))
                .build()
                .unwrap(),
        )
        .with_entry(
            Entry::builder()
                .with_name("address")
                .with_type(Type::Record)
                .with_nullable(true)
                .with_element_schema(address)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let arrow_schema = schema_to_arrow_schema(&schema).unwrap();
    let types: Vec<_> = arrow_schema
        .fields()
        .iter()
        .map(|f| (f.name().as_str(), f.data_type().clone(), f.is_nullable()))
        .collect();

    assert_eq!(
        types,
        vec![
            ("s", DataType::Utf8, true),
            ("i", DataType::Int32, false),
            ("l", DataType::Int64, false),
            ("f", DataType::Float32, false),
            ("d", DataType::Float64, false),
            ("b", DataType::Boolean, false),
            ("bytes", DataType::Binary, true),
            (
                "at",
                DataType::Timestamp(TimeUnit::Millisecond, Some(Arc::from("+00:00"))),
                true
            ),
            (
                "tags",
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
                false
            ),
            (
                "address",
                DataType::Struct(
                    vec![
                        Field::new("city", DataType::Utf8, false),
                        Field::new("zip", DataType::Int32, true),
                    ]
                    .into()
                ),
                true
            ),
        ]
    );
}

#[test]
fn schema_to_arrow_schema_carries_props_as_metadata() {
    let schema = Schema::builder()
        .with_prop("source", "crm")
        .with_entry(
            Entry::builder()
                .with_name("email")
                .with_type(Type::String)
                .with_prop("dqType", "email")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let arrow_schema = schema_to_arrow_schema(&schema).unwrap();
    assert_eq!(
        arrow_schema.metadata().get("source").map(String::as_str),
        Some("crm")
    );
    let email = arrow_schema.field_with_name("email").unwrap();
    assert_eq!(
        email.metadata().get("dqType").map(String::as_str),
        Some("email")
    );
}

#[test]
fn array_of_records_becomes_list_of_structs() {
    let point = Schema::builder()
        .with_entry(entry("x", Type::Double, false))
        .build()
        .unwrap();
    let schema = Schema::builder()
        .with_entry(
            Entry::builder()
                .with_name("points")
                .with_type(Type::Array)
                .with_element_schema(point)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let arrow_schema = schema_to_arrow_schema(&schema).unwrap();
    assert_eq!(
        arrow_schema.field(0).data_type(),
        &DataType::List(Arc::new(Field::new(
            "item",
            DataType::Struct(vec![Field::new("x", DataType::Float64, false)].into()),
            true,
        )))
    );
}

#[test]
fn unsupported_shapes_are_reported() {
    let root = schema_to_arrow_schema(&Schema::of(Type::String)).unwrap_err();
    assert!(matches!(
        root,
        ArrowConvertError::UnsupportedElement { ref name, entry_type: Type::String } if name.is_empty()
    ));

    let nested = Schema::builder()
        .with_entry(
            Entry::builder()
                .with_name("matrix")
                .with_type(Type::Array)
                .with_element_schema(Schema::of(Type::Array))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let err = schema_to_arrow_schema(&nested).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::UnsupportedElement { ref name, entry_type: Type::Array } if name == "matrix"
    ));
}
