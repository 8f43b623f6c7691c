use std::{collections::HashMap, sync::Arc};

use arrow::datatypes::{DataType, Field, Schema as ArrowSchema, TimeUnit};
use recordkit_core::{Entry, Props, Schema, SchemaError, Type};

use crate::error::ArrowConvertError;

/// Converts a RECORD schema into an Arrow schema, one field per entry.
///
/// Entry nullability is kept, schema and entry properties become Arrow
/// metadata, and DATETIME maps to a millisecond `Timestamp` in UTC. Array
/// items are always nullable.
pub fn schema_to_arrow_schema(schema: &Schema) -> Result<ArrowSchema, ArrowConvertError> {
    if schema.schema_type() != Type::Record {
        return Err(ArrowConvertError::UnsupportedElement {
            name: String::new(),
            entry_type: schema.schema_type(),
        });
    }
    let fields = entries_to_fields(schema)?;
    Ok(ArrowSchema::new_with_metadata(
        fields,
        props_to_metadata(schema.props()),
    ))
}

fn entries_to_fields(schema: &Schema) -> Result<Vec<Field>, ArrowConvertError> {
    schema.entries().iter().map(entry_to_field).collect()
}

fn entry_to_field(entry: &Entry) -> Result<Field, ArrowConvertError> {
    let field = Field::new(entry.name(), entry_data_type(entry)?, entry.is_nullable());
    Ok(field.with_metadata(props_to_metadata(entry.props())))
}

fn entry_data_type(entry: &Entry) -> Result<DataType, ArrowConvertError> {
    if let Some(dt) = primitive_data_type(entry.entry_type()) {
        return Ok(dt);
    }
    let element = entry
        .element_schema()
        .ok_or_else(|| SchemaError::MissingElementSchema {
            name: entry.name().to_string(),
            entry_type: entry.entry_type(),
        })?;

    match entry.entry_type() {
        Type::Array => {
            let item = element_data_type(entry.name(), element)?;
            Ok(DataType::List(Arc::new(Field::new("item", item, true))))
        }
        _ => match element.schema_type() {
            Type::Record => Ok(DataType::Struct(entries_to_fields(element)?.into())),
            other => Err(unsupported(entry.name(), other)),
        },
    }
}

fn element_data_type(name: &str, element: &Schema) -> Result<DataType, ArrowConvertError> {
    match element.schema_type() {
        Type::Record => Ok(DataType::Struct(entries_to_fields(element)?.into())),
        other => primitive_data_type(other).ok_or_else(|| unsupported(name, other)),
    }
}

fn primitive_data_type(entry_type: Type) -> Option<DataType> {
    Some(match entry_type {
        Type::String => DataType::Utf8,
        Type::Int => DataType::Int32,
        Type::Long => DataType::Int64,
        Type::Float => DataType::Float32,
        Type::Double => DataType::Float64,
        Type::Boolean => DataType::Boolean,
        Type::Bytes => DataType::Binary,
        Type::DateTime => {
            DataType::Timestamp(TimeUnit::Millisecond, Some(Arc::from(crate::TIMESTAMP_TZ)))
        }
        Type::Array | Type::Record => return None,
    })
}

fn props_to_metadata(props: &Props) -> HashMap<String, String> {
    props.to_hash_map()
}

fn unsupported(name: &str, entry_type: Type) -> ArrowConvertError {
    ArrowConvertError::UnsupportedElement {
        name: name.to_string(),
        entry_type,
    }
}
