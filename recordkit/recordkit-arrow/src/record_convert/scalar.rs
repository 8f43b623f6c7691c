use arrow::datatypes::{DataType, TimeUnit};
use recordkit_core::Value;

use crate::error::ArrowConvertError;

pub(super) enum ScalarValue<'a> {
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Utf8(Option<&'a str>),
    Binary(Option<&'a [u8]>),
    TimestampMillisecond(Option<i64>),
}

macro_rules! scalar {
    ($value:expr, $dt:expr, $column:expr, $variant:ident, $pat:pat => $out:expr) => {
        ScalarValue::$variant(match $value {
            None => None,
            Some($pat) => Some($out),
            Some(other) => return Err(value_type_error($column, $dt, other)),
        })
    };
}

/// Scalar view of `value` for a scalar column; `Ok(None)` for nested columns.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: Option<&'a Value>,
    column: &str,
) -> Result<Option<ScalarValue<'a>>, ArrowConvertError> {
    Ok(Some(match dt {
        DataType::Boolean => scalar!(value, dt, column, Boolean, Value::Boolean(v) => *v),
        DataType::Int32 => scalar!(value, dt, column, Int32, Value::Int(v) => *v),
        DataType::Int64 => scalar!(value, dt, column, Int64, Value::Long(v) => *v),
        DataType::Float32 => scalar!(value, dt, column, Float32, Value::Float(v) => *v),
        DataType::Float64 => scalar!(value, dt, column, Float64, Value::Double(v) => *v),
        DataType::Utf8 => scalar!(value, dt, column, Utf8, Value::String(v) => v.as_str()),
        DataType::Binary => scalar!(value, dt, column, Binary, Value::Bytes(v) => v.as_slice()),
        DataType::Timestamp(TimeUnit::Millisecond, _) => scalar!(
            value, dt, column, TimestampMillisecond,
            Value::DateTime(v) | Value::Long(v) => *v
        ),
        _ => return Ok(None),
    }))
}

/// Record value kind a column of type `dt` is filled from.
pub(super) fn expected_kind(dt: &DataType) -> &'static str {
    match dt {
        DataType::Boolean => "Boolean",
        DataType::Int32 => "Int",
        DataType::Int64 => "Long",
        DataType::Float32 => "Float",
        DataType::Float64 => "Double",
        DataType::Utf8 => "String",
        DataType::Binary => "Bytes",
        DataType::Timestamp(_, _) => "DateTime",
        DataType::List(_) => "Array",
        DataType::Struct(_) => "Record",
        _ => "Value",
    }
}

pub(super) fn value_type_error(column: &str, dt: &DataType, actual: &Value) -> ArrowConvertError {
    ArrowConvertError::ValueType {
        column: column.to_string(),
        expected: expected_kind(dt),
        actual: actual.variant_name(),
    }
}
