use arrow::array::{
    Array, BinaryArray, BooleanArray, Float64Array, Int32Array, Int64Array, ListArray,
    StringArray, StructArray, TimestampMillisecondArray,
};
use chrono::{TimeZone, Utc};
use recordkit_arrow::{ArrowConvertError, records_to_record_batch};
use recordkit_core::{Entry, Record, RecordBuilder, Schema, Type};

fn entry(name: &str, entry_type: Type, nullable: bool) -> Entry {
    Entry::builder()
        .with_name(name)
        .with_type(entry_type)
        .with_nullable(nullable)
        .build()
        .unwrap()
}

fn address_schema() -> Schema {
    Schema::builder()
        .with_entry(entry("city", Type::String, false))
        .with_entry(entry("zip", Type::Int, true))
        .build()
        .unwrap()
}

fn customer_schema() -> Schema {
    Schema::builder()
        .with_entry(entry("id", Type::Long, false))
        .with_entry(entry("name", Type::String, true))
        .with_entry(entry("score", Type::Double, true))
        .with_entry(entry("active", Type::Boolean, true))
        .with_entry(entry("avatar", Type::Bytes, true))
        .with_entry(entry("since", Type::DateTime, true))
        .with_entry(
            Entry::builder()
                .with_name("tags")
                .with_type(Type::Array)
                .with_nullable(true)
                .with_element_schema(Schema::of(Type::String))
                .build()
                .unwrap(),
        )
        .with_entry(
            Entry::builder()
                .with_name("address")
                .with_type(Type::Record)
                .with_nullable(true)
                .with_element_schema(address_schema())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn address(city: &str) -> Record {
    let mut builder = RecordBuilder::with_schema(address_schema());
    builder.with_string("city", city).unwrap();
    builder.build().unwrap()
}

#[test]
fn records_to_record_batch_mixed_types() {
    let schema = customer_schema();
    let since = Utc.with_ymd_and_hms(2020, 2, 3, 4, 5, 6).unwrap();

    let mut first = RecordBuilder::with_schema(schema.clone());
    first
        .with_long("id", 1)
        .unwrap()
        .with_string("name", "Ada")
        .unwrap()
        .with_double("score", 9.5)
        .unwrap()
        .with_boolean("active", true)
        .unwrap()
        .with_bytes("avatar", vec![0_u8, 1])
        .unwrap()
        .with_date_time("since", since)
        .unwrap()
        .with_array("tags", ["a", "b"])
        .unwrap()
        .with_record("address", address("Paris"))
        .unwrap();

    let mut second = RecordBuilder::with_schema(schema.clone());
    second.with_long("id", 2).unwrap();

    let rows = vec![first.build().unwrap(), second.build().unwrap()];
    let batch = records_to_record_batch(&schema, &rows).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 8);

    let id = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(id.value(0), 1);
    assert_eq!(id.value(1), 2);

    let name = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(name.value(0), "Ada");
    assert!(name.is_null(1));

    let score = batch
        .column(2)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(score.value(0), 9.5);
    assert!(score.is_null(1));

    let active = batch
        .column(3)
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    assert!(active.value(0));
    assert!(active.is_null(1));

    let avatar = batch
        .column(4)
        .as_any()
        .downcast_ref::<BinaryArray>()
        .unwrap();
    assert_eq!(avatar.value(0), &[0_u8, 1]);
    assert!(avatar.is_null(1));

    let since_col = batch
        .column(5)
        .as_any()
        .downcast_ref::<TimestampMillisecondArray>()
        .unwrap();
    assert_eq!(since_col.value(0), since.timestamp_millis());
    assert_eq!(since_col.timezone(), Some("+00:00"));
    assert!(since_col.is_null(1));

    let tags = batch
        .column(6)
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert!(tags.is_valid(0));
    assert!(tags.is_null(1));
    assert_eq!(tags.value_offsets(), &[0, 2, 2]);
    let tag_values = tags
        .values()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(tag_values.value(0), "a");
    assert_eq!(tag_values.value(1), "b");

    let nested = batch
        .column(7)
        .as_any()
        .downcast_ref::<StructArray>()
        .unwrap();
    assert!(nested.is_valid(0));
    assert!(nested.is_null(1));
    let city = nested
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    let zip = nested
        .column(1)
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    assert_eq!(city.value(0), "Paris");
    assert!(zip.is_null(0));
}

#[test]
fn records_to_record_batch_accepts_empty_input() {
    let schema = customer_schema();
    let batch = records_to_record_batch(&schema, &[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 8);
}

#[test]
fn free_form_records_convert_with_their_own_schema() {
    let mut builder = Record::builder();
    builder
        .with_timestamp("seen", 1_000)
        .unwrap()
        .with_int("count", 3)
        .unwrap();
    let record = builder.build().unwrap();

    let batch = records_to_record_batch(record.schema(), std::slice::from_ref(&record)).unwrap();
    let seen = batch
        .column_by_name("seen")
        .unwrap()
        .as_any()
        .downcast_ref::<TimestampMillisecondArray>()
        .unwrap();
    assert_eq!(seen.value(0), 1_000);
    let count = batch
        .column_by_name("count")
        .unwrap()
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    assert_eq!(count.value(0), 3);
}

#[test]
fn mismatched_value_is_reported_with_column() {
    let mut builder = Record::builder();
    builder.with_string("id", "not a number").unwrap();
    let record = builder.build().unwrap();

    let schema = Schema::builder()
        .with_entry(entry("id", Type::Long, true))
        .build()
        .unwrap();
    let err = records_to_record_batch(&schema, &[record]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::ValueType { ref column, expected: "Long", actual: "String" } if column == "id"
    ));
}

#[test]
fn missing_required_value_is_reported() {
    let record = Record::builder().build().unwrap();
    let schema = Schema::builder()
        .with_entry(entry("id", Type::Long, false))
        .build()
        .unwrap();

    let err = records_to_record_batch(&schema, &[record]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::ValueType { ref column, expected: "Long", actual: "Null" } if column == "id"
    ));
}

#[test]
fn nested_record_missing_required_field_is_reported() {
    let mut loose = Record::builder();
    loose.with_int("zip", 75000).unwrap();
    let loose = loose.build().unwrap();

    let mut holder = Record::builder();
    holder.with_record("address", loose).unwrap();
    let holder = holder.build().unwrap();

    let schema = Schema::builder()
        .with_entry(
            Entry::builder()
                .with_name("address")
                .with_type(Type::Record)
                .with_nullable(true)
                .with_element_schema(address_schema())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let err = records_to_record_batch(&schema, &[holder]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::ValueType { ref column, expected: "String", actual: "Null" } if column == "address"
    ));
}
