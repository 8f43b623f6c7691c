//! Stored record values and the inputs accepted by the record builder.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::record::Record;

/// Value stored in a [`Record`].
///
/// Datetimes are always stored as epoch milliseconds, whatever representation
/// was used to set them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bytes(Vec<u8>),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    DateTime(i64),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Boolean(_) => "Boolean",
            Value::DateTime(_) => "DateTime",
            Value::Array(_) => "Array",
            Value::Record(_) => "Record",
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    String => String,
    &str => String,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    Vec<Value> => Array,
    Record => Record,
}

/// Temporal input accepted by `DATETIME` setters.
///
/// Every variant normalizes to epoch milliseconds before storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeValue {
    EpochMillis(i64),
    /// Calendar instant, millisecond precision.
    Date(DateTime<Utc>),
    /// Zoned timestamp, millisecond precision.
    Zoned(DateTime<FixedOffset>),
    /// Generic temporal value read as UTC at whole-second granularity.
    Temporal(NaiveDateTime),
}

impl DateTimeValue {
    pub fn epoch_millis(&self) -> i64 {
        match self {
            DateTimeValue::EpochMillis(millis) => *millis,
            DateTimeValue::Date(date) => date.timestamp_millis(),
            DateTimeValue::Zoned(zoned) => zoned.timestamp_millis(),
            DateTimeValue::Temporal(temporal) => temporal.and_utc().timestamp() * 1000,
        }
    }
}

impl From<i64> for DateTimeValue {
    fn from(value: i64) -> Self {
        DateTimeValue::EpochMillis(value)
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateTimeValue::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for DateTimeValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateTimeValue::Zoned(value)
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(value: NaiveDateTime) -> Self {
        DateTimeValue::Temporal(value)
    }
}

/// Input of the generic [`RecordBuilder::with`](crate::RecordBuilder::with)
/// dispatcher: a null, a storable value, or a temporal value still to be
/// normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Value(Value),
    DateTime(DateTimeValue),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Value(value) => value.variant_name(),
            FieldValue::DateTime(_) => "DateTime",
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Value(value)
    }
}

impl From<DateTimeValue> for FieldValue {
    fn from(value: DateTimeValue) -> Self {
        FieldValue::DateTime(value)
    }
}

macro_rules! field_value_from {
    (value: $($ty:ty),*; datetime: $($dt:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Value(value.into())
                }
            }
        )*
        $(
            impl From<$dt> for FieldValue {
                fn from(value: $dt) -> Self {
                    FieldValue::DateTime(value.into())
                }
            }
        )*
    };
}

field_value_from! {
    value: String, &str, Vec<u8>, &[u8], i32, i64, f32, f64, bool, Vec<Value>, Record;
    datetime: DateTime<Utc>, DateTime<FixedOffset>, NaiveDateTime,
}
