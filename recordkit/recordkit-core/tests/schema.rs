use recordkit_core::{Entry, Schema, SchemaError, Type, format_schema};

fn string_entry(name: &str) -> Result<Entry, SchemaError> {
    Entry::builder().with_name(name).with_type(Type::String).build()
}

#[test]
fn schema_builder_defaults_to_record_and_keeps_entry_order() -> Result<(), SchemaError> {
    let schema = Schema::builder()
        .with_entry(string_entry("b")?)
        .with_entry(string_entry("a")?)
        .build()?;

    assert_eq!(schema.schema_type(), Type::Record);
    let names: Vec<_> = schema.entries().iter().map(Entry::name).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(schema.entry("a").map(Entry::entry_type), Some(Type::String));
    assert!(schema.entry("c").is_none());
    Ok(())
}

#[test]
fn duplicate_entry_names_are_rejected_at_build() -> Result<(), SchemaError> {
    let result = Schema::builder()
        .with_entry(string_entry("a")?)
        .with_entry(string_entry("a")?)
        .build();
    assert_eq!(
        result,
        Err(SchemaError::DuplicateEntry {
            name: "a".to_string()
        })
    );
    Ok(())
}

#[test]
fn array_entry_in_schema_requires_element_schema() -> Result<(), SchemaError> {
    let entry = Entry::builder()
        .with_name("tags")
        .with_type(Type::Array)
        .build()?;
    let result = Schema::builder().with_entry(entry).build();
    assert_eq!(
        result,
        Err(SchemaError::MissingElementSchema {
            name: "tags".to_string(),
            entry_type: Type::Array,
        })
    );
    Ok(())
}

#[test]
fn entry_builder_requires_name_and_type() {
    assert_eq!(
        Entry::builder().with_type(Type::Int).build(),
        Err(SchemaError::MissingEntryName)
    );
    assert_eq!(
        Entry::builder().with_name("").with_type(Type::Int).build(),
        Err(SchemaError::EmptyEntryName)
    );
    assert_eq!(
        Entry::builder().with_name("n").build(),
        Err(SchemaError::MissingEntryType {
            name: "n".to_string()
        })
    );
}

#[test]
fn entry_metadata_is_exposed() -> Result<(), SchemaError> {
    let entry = Entry::builder()
        .with_name("city")
        .with_raw_name("City Name")
        .with_comment("where the customer lives")
        .with_type(Type::String)
        .with_nullable(true)
        .build()?;

    assert_eq!(entry.raw_name(), Some("City Name"));
    assert_eq!(entry.original_field_name(), "City Name");
    assert_eq!(entry.comment(), Some("where the customer lives"));
    assert!(entry.is_nullable());
    assert!(entry.element_schema().is_none());

    let plain = string_entry("zip")?;
    assert_eq!(plain.original_field_name(), "zip");
    assert!(!plain.is_nullable());
    Ok(())
}

#[test]
fn schema_props_merge_last_write_wins_in_place() -> Result<(), SchemaError> {
    let root_props: Vec<(String, String)> = (0..10)
        .map(|i| (format!("key{i}"), format!("value{i}")))
        .collect();

    let schema = Schema::builder()
        .with_prop("key9", "rootPropValue9")
        .with_props(root_props)
        .with_prop("key1", "rootPropValue1")
        .with_prop("key2", "rootPropValue2")
        .with_prop("rootProp2", "rootPropValue2")
        .build()?;

    let props = schema.props();
    assert_eq!(props.len(), 11);
    assert_eq!(schema.prop("key1"), Some("rootPropValue1"));
    assert_eq!(schema.prop("key2"), Some("rootPropValue2"));
    assert_eq!(schema.prop("key3"), Some("value3"));
    assert_eq!(schema.prop("key9"), Some("value9"));
    assert_eq!(schema.prop("rootProp2"), Some("rootPropValue2"));

    let keys: Vec<_> = props.keys().collect();
    assert_eq!(keys[0], "key9");
    assert_eq!(keys[1], "key0");
    assert_eq!(keys[10], "rootProp2");
    Ok(())
}

#[test]
fn entry_props_merge_follows_call_order() -> Result<(), SchemaError> {
    let field_props = [
        ("dqType", "one_1"),
        ("org.example.metadata.two", "two_2"),
    ];

    let first = Entry::builder()
        .with_name("f01")
        .with_type(Type::String)
        .with_prop("dqType", "semantic-test1")
        .with_props(field_props)
        .build()?;
    let second = Entry::builder()
        .with_name("f02")
        .with_type(Type::String)
        .with_props(field_props)
        .with_prop("dqType", "semantic-test2")
        .build()?;

    assert_eq!(first.props().len(), 2);
    assert_eq!(first.prop("dqType"), Some("one_1"));
    assert_eq!(first.prop("org.example.metadata.two"), Some("two_2"));
    assert_eq!(second.props().len(), 2);
    assert_eq!(second.prop("dqType"), Some("semantic-test2"));
    Ok(())
}

#[test]
fn schemas_compare_structurally() -> Result<(), SchemaError> {
    let build = |value: &str| -> Result<Schema, SchemaError> {
        Schema::builder()
            .with_prop("owner", value)
            .with_entry(string_entry("a")?)
            .build()
    };
    assert_eq!(build("x")?, build("x")?);
    assert_ne!(build("x")?, build("y")?);
    Ok(())
}

#[test]
fn nested_schema_is_formatted_as_outline() -> Result<(), Box<dyn std::error::Error>> {
    let address = Schema::builder()
        .with_entry(string_entry("city")?)
        .build()?;
    let schema = Schema::builder()
        .with_entry(
            Entry::builder()
                .with_name("id")
                .with_type(Type::Long)
                .build()?,
        )
        .with_entry(
            Entry::builder()
                .with_name("tags")
                .with_type(Type::Array)
                .with_nullable(true)
                .with_element_schema(Schema::of(Type::String))
                .build()?,
        )
        .with_entry(
            Entry::builder()
                .with_name("address")
                .with_type(Type::Record)
                .with_element_schema(address)
                .with_prop("dqType", "location")
                .build()?,
        )
        .with_prop("source", "crm")
        .build()?;

    let expected = "\
id: { type: LONG, nullable: false }
tags:
    type: ARRAY
    nullable: true
    element:
        type: STRING
address:
    type: RECORD
    nullable: false
    fields:
        city: { type: STRING, nullable: false }
    props:
        dqType: location
props:
    source: crm
";
    assert_eq!(format_schema(&schema)?, expected);
    assert_eq!(schema.to_string(), expected);
    Ok(())
}
