use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Float32Builder, Float64Builder,
        Int32Builder, Int64Builder, ListBuilder, StringBuilder, StructBuilder,
        TimestampMillisecondBuilder,
    },
    datatypes::{DataType, Field},
    error::ArrowError,
};
use recordkit_core::Value;

use super::scalar::{ScalarValue, expected_kind, scalar_value_for_datatype, value_type_error};
use crate::error::ArrowConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .expect(concat!("expected builder type: ", stringify!($T)))
    };
}

fn append_scalar_dyn(builder: &mut Box<dyn ArrayBuilder>, scalar: &ScalarValue<'_>) {
    match scalar {
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder).append_option(*v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder).append_option(*v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder).append_option(*v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder).append_option(*v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder).append_option(*v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder).append_option(*v),
        ScalarValue::Binary(v) => cast_builder!(builder, BinaryBuilder).append_option(*v),
        ScalarValue::TimestampMillisecond(v) => {
            cast_builder!(builder, TimestampMillisecondBuilder).append_option(*v)
        }
    }
}

/// Rejects a missing value for a non-nullable field.
pub(super) fn require_value(
    field: &Field,
    value: Option<&Value>,
    column: &str,
) -> Result<(), ArrowConvertError> {
    if value.is_none() && !field.is_nullable() {
        return Err(ArrowConvertError::ValueType {
            column: column.to_string(),
            expected: expected_kind(field.data_type()),
            actual: "Null",
        });
    }
    Ok(())
}

/// Appends one slot; `None` appends a null.
///
/// `column` names the top-level column in errors.
pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: Option<&Value>,
    column: &str,
) -> Result<(), ArrowConvertError> {
    if let Some(scalar) = scalar_value_for_datatype(dt, value, column)? {
        append_scalar_dyn(builder, &scalar);
        return Ok(());
    }

    match dt {
        DataType::List(field) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            match value {
                Some(Value::Array(items)) => {
                    for item in items {
                        append_value_to_builder(b.values(), field.data_type(), Some(item), column)?;
                    }
                    b.append(true);
                }
                None => b.append(false),
                Some(other) => return Err(value_type_error(column, dt, other)),
            }
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            match value {
                Some(Value::Record(record)) => {
                    for (i, field) in fields.iter().enumerate() {
                        let child = record.value(field.name());
                        require_value(field, child, column)?;
                        append_value_to_struct_field(b, i, field.data_type(), child, column)?;
                    }
                    b.append(true);
                }
                None => {
                    for (i, field) in fields.iter().enumerate() {
                        append_value_to_struct_field(b, i, field.data_type(), None, column)?;
                    }
                    b.append(false);
                }
                Some(other) => return Err(value_type_error(column, dt, other)),
            }
        }
        other => {
            return Err(ArrowError::NotYetImplemented(format!(
                "cannot append record values to {other}"
            ))
            .into());
        }
    }
    Ok(())
}

fn append_value_to_struct_field(
    sb: &mut StructBuilder,
    index: usize,
    dt: &DataType,
    value: Option<&Value>,
    column: &str,
) -> Result<(), ArrowConvertError> {
    append_value_to_builder(&mut sb.field_builders_mut()[index], dt, value, column)
}
