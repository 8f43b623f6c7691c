//! Diagnostic JSON rendering of records.
//!
//! The output is meant for logs and debugging; its exact text is not a stable
//! interchange format.

use serde_json::{Map, Number, Value as Json};

use crate::{coerce::format_millis, record::Record, value::Value};

pub(crate) fn record_to_json(record: &Record) -> Json {
    let object: Map<String, Json> = record
        .values()
        .iter()
        .map(|(name, value)| (name.clone(), value_to_json(value)))
        .collect();
    Json::Object(object)
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(bytes) => Json::Array(bytes.iter().map(|b| Json::from(*b)).collect()),
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        Value::Float(v) => float_to_json(f64::from(*v)),
        Value::Double(v) => float_to_json(*v),
        Value::Boolean(v) => Json::Bool(*v),
        Value::DateTime(millis) => format_millis(*millis).map_or(Json::from(*millis), Json::String),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Record(nested) => record_to_json(nested),
    }
}

fn float_to_json(v: f64) -> Json {
    Number::from_f64(v).map_or(Json::Null, Json::Number)
}
