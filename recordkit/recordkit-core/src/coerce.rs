//! Read-time coercion of stored values into requested representations.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::{record::Record, value::Value};

/// Representation requested by a typed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repr {
    String,
    Bytes,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    /// `DateTime<Utc>`.
    Instant,
    /// `DateTime<FixedOffset>`.
    Zoned,
    Array,
    Record,
    /// Any stored value, as is.
    Value,
}

impl Repr {
    pub fn name(&self) -> &'static str {
        match self {
            Repr::String => "String",
            Repr::Bytes => "Bytes",
            Repr::Int => "Int",
            Repr::Long => "Long",
            Repr::Float => "Float",
            Repr::Double => "Double",
            Repr::Boolean => "Boolean",
            Repr::Instant => "Instant",
            Repr::Zoned => "Zoned",
            Repr::Array => "Array",
            Repr::Record => "Record",
            Repr::Value => "Value",
        }
    }
}

impl Display for Repr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a [`Coercer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(Value),
    Instant(DateTime<Utc>),
    Zoned(DateTime<FixedOffset>),
}

/// Converts a stored value into a requested representation.
///
/// Returns `None` when no conversion is known.
pub trait Coercer {
    fn coerce(&self, value: &Value, target: Repr) -> Option<Coerced>;
}

/// Conversions used by [`Record::get`].
///
/// - numbers convert between each other; narrowing to an integer truncates
///   toward zero and yields no coercion when the value is out of range or not
///   finite; epoch millis count as a number
/// - epoch millis convert to instants and zoned timestamps (UTC)
/// - RFC 3339 strings convert to instants, zoned timestamps and epoch millis
/// - scalars convert to strings; strings parse to numbers and booleans
/// - UTF-8 strings and bytes convert to each other
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCoercer;

impl Coercer for DefaultCoercer {
    fn coerce(&self, value: &Value, target: Repr) -> Option<Coerced> {
        tracing::trace!(from = value.variant_name(), to = %target, "coercing record value");
        match target {
            Repr::Int | Repr::Long | Repr::Float | Repr::Double => {
                coerce_number(value, target).map(Coerced::Value)
            }
            Repr::Instant => epoch_millis(value)
                .and_then(DateTime::from_timestamp_millis)
                .map(Coerced::Instant),
            Repr::Zoned => epoch_millis(value)
                .and_then(DateTime::from_timestamp_millis)
                .map(|instant| Coerced::Zoned(instant.fixed_offset())),
            Repr::String => coerce_string(value).map(|s| Coerced::Value(Value::String(s))),
            Repr::Bytes => match value {
                Value::String(s) => Some(Coerced::Value(Value::Bytes(s.as_bytes().to_vec()))),
                _ => None,
            },
            Repr::Boolean => match value {
                Value::String(s) => s.parse().ok().map(|b| Coerced::Value(Value::Boolean(b))),
                _ => None,
            },
            Repr::Array | Repr::Record => None,
            Repr::Value => Some(Coerced::Value(value.clone())),
        }
    }
}

fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::DateTime(millis) | Value::Long(millis) => Some(*millis),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.timestamp_millis()),
        _ => None,
    }
}

fn coerce_number(value: &Value, target: Repr) -> Option<Value> {
    let number = match value {
        Value::Int(v) => Number::Int(i64::from(*v)),
        Value::Long(v) | Value::DateTime(v) => Number::Int(*v),
        Value::Float(v) => Number::Float(f64::from(*v)),
        Value::Double(v) => Number::Float(*v),
        Value::String(s) => parse_number(s.trim())?,
        _ => return None,
    };

    Some(match (target, number) {
        (Repr::Int, Number::Int(v)) => Value::Int(i32::try_from(v).ok()?),
        (Repr::Int, Number::Float(v)) => {
            let v = v.trunc();
            if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v) {
                return None;
            }
            Value::Int(v as i32)
        }
        (Repr::Long, Number::Int(v)) => Value::Long(v),
        (Repr::Long, Number::Float(v)) => {
            let v = v.trunc();
            // i64::MAX rounds up to 2^63 as f64, which is already out of range.
            if !(i64::MIN as f64..i64::MAX as f64).contains(&v) {
                return None;
            }
            Value::Long(v as i64)
        }
        (Repr::Float, Number::Int(v)) => Value::Float(v as f32),
        (Repr::Float, Number::Float(v)) => Value::Float(v as f32),
        (Repr::Double, Number::Int(v)) => Value::Double(v as f64),
        (Repr::Double, Number::Float(v)) => Value::Double(v),
        _ => return None,
    })
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn parse_number(s: &str) -> Option<Number> {
    s.parse::<i64>()
        .map(Number::Int)
        .or_else(|_| s.parse::<f64>().map(Number::Float))
        .ok()
}

fn coerce_string(value: &Value) -> Option<String> {
    Some(match value {
        Value::String(s) => s.clone(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Boolean(v) => v.to_string(),
        Value::DateTime(millis) => format_millis(*millis)?,
        Value::Bytes(bytes) => String::from_utf8(bytes.clone()).ok()?,
        Value::Array(_) | Value::Record(_) => return None,
    })
}

/// RFC 3339 UTC rendering with millisecond precision.
pub(crate) fn format_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis)
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Type readable from a record through [`Record::get`].
pub trait FromValue: Sized {
    /// Representation requested from the coercer when the stored value does
    /// not match directly.
    const REPR: Repr;

    /// Direct read, without coercion.
    fn from_value(value: &Value) -> Option<Self>;

    fn from_coerced(coerced: Coerced) -> Option<Self>;
}

macro_rules! from_stored_value {
    ($($ty:ty => $repr:ident, $pat:pat => $out:expr);* $(;)?) => {
        $(
            impl FromValue for $ty {
                const REPR: Repr = Repr::$repr;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        $pat => Some($out),
                        _ => None,
                    }
                }

                fn from_coerced(coerced: Coerced) -> Option<Self> {
                    match coerced {
                        Coerced::Value(value) => Self::from_value(&value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_stored_value! {
    String => String, Value::String(v) => v.clone();
    Vec<u8> => Bytes, Value::Bytes(v) => v.clone();
    i32 => Int, Value::Int(v) => *v;
    i64 => Long, Value::Long(v) | Value::DateTime(v) => *v;
    f32 => Float, Value::Float(v) => *v;
    f64 => Double, Value::Double(v) => *v;
    bool => Boolean, Value::Boolean(v) => *v;
    Vec<Value> => Array, Value::Array(v) => v.clone();
    Record => Record, Value::Record(v) => v.clone();
}

impl FromValue for Value {
    const REPR: Repr = Repr::Value;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn from_coerced(coerced: Coerced) -> Option<Self> {
        match coerced {
            Coerced::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    const REPR: Repr = Repr::Instant;

    fn from_value(_: &Value) -> Option<Self> {
        None
    }

    fn from_coerced(coerced: Coerced) -> Option<Self> {
        match coerced {
            Coerced::Instant(instant) => Some(instant),
            Coerced::Zoned(zoned) => Some(zoned.with_timezone(&Utc)),
            Coerced::Value(_) => None,
        }
    }
}

impl FromValue for DateTime<FixedOffset> {
    const REPR: Repr = Repr::Zoned;

    fn from_value(_: &Value) -> Option<Self> {
        None
    }

    fn from_coerced(coerced: Coerced) -> Option<Self> {
        match coerced {
            Coerced::Zoned(zoned) => Some(zoned),
            Coerced::Instant(instant) => Some(instant.fixed_offset()),
            Coerced::Value(_) => None,
        }
    }
}
