//! Immutable records and typed access.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    sync::Arc,
};

use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    builder::RecordBuilder,
    coerce::{Coercer, DefaultCoercer, FromValue},
    error::RecordError,
    schema::Schema,
    value::Value,
};

/// Field values frozen together with the schema they were built under.
///
/// A record is produced once by [`RecordBuilder::build`] and never changes;
/// clones share the same schema and values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Arc<HashMap<String, Value>>,
}

impl Record {
    pub(crate) fn new(schema: Arc<Schema>, values: HashMap<String, Value>) -> Self {
        Self {
            schema,
            values: Arc::new(values),
        }
    }

    /// Free-form builder.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Shared handle to the schema, e.g. to build sibling records.
    pub fn shared_schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// Stored value of `name`; `None` when the field is absent.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads `name` as `T`, coercing with [`DefaultCoercer`] when the stored
    /// representation differs.
    ///
    /// Absent fields read as `Ok(None)`.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<Option<T>, RecordError> {
        self.get_with(name, &DefaultCoercer)
    }

    /// Same as [`get`](Self::get) with a caller-supplied coercer.
    pub fn get_with<T, C>(&self, name: &str, coercer: &C) -> Result<Option<T>, RecordError>
    where
        T: FromValue,
        C: Coercer + ?Sized,
    {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => read_as(name, value, coercer).map(Some),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<Option<String>, RecordError> {
        self.get(name)
    }

    pub fn get_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, RecordError> {
        self.get(name)
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i32>, RecordError> {
        self.get(name)
    }

    pub fn get_long(&self, name: &str) -> Result<Option<i64>, RecordError> {
        self.get(name)
    }

    pub fn get_float(&self, name: &str) -> Result<Option<f32>, RecordError> {
        self.get(name)
    }

    pub fn get_double(&self, name: &str) -> Result<Option<f64>, RecordError> {
        self.get(name)
    }

    pub fn get_boolean(&self, name: &str) -> Result<Option<bool>, RecordError> {
        self.get(name)
    }

    /// Epoch milliseconds of a `DATETIME` field.
    pub fn get_timestamp(&self, name: &str) -> Result<Option<i64>, RecordError> {
        self.get(name)
    }

    pub fn get_date_time(&self, name: &str) -> Result<Option<DateTime<Utc>>, RecordError> {
        self.get(name)
    }

    pub fn get_zoned_date_time(
        &self,
        name: &str,
    ) -> Result<Option<DateTime<FixedOffset>>, RecordError> {
        self.get(name)
    }

    pub fn get_record(&self, name: &str) -> Result<Option<Record>, RecordError> {
        self.get(name)
    }

    /// Reads an `ARRAY` field, converting every item to `T`.
    pub fn get_array<T: FromValue>(&self, name: &str) -> Result<Option<Vec<T>>, RecordError> {
        let Some(value) = self.values.get(name) else {
            return Ok(None);
        };
        let Value::Array(items) = value else {
            return Err(no_coercion::<Vec<Value>>(name, value));
        };
        items
            .iter()
            .map(|item| read_as(name, item, &DefaultCoercer))
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }

    /// Structured text form of the record, for diagnostics.
    pub fn to_json(&self) -> serde_json::Value {
        crate::render::record_to_json(self)
    }

    pub(crate) fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }
}

fn read_as<T, C>(name: &str, value: &Value, coercer: &C) -> Result<T, RecordError>
where
    T: FromValue,
    C: Coercer + ?Sized,
{
    if let Some(direct) = T::from_value(value) {
        return Ok(direct);
    }
    coercer
        .coerce(value, T::REPR)
        .and_then(T::from_coerced)
        .ok_or_else(|| no_coercion::<T>(name, value))
}

fn no_coercion<T: FromValue>(name: &str, value: &Value) -> RecordError {
    RecordError::NoCoercion {
        name: name.to_string(),
        from: value.variant_name(),
        to: T::REPR.name(),
    }
}

/// JSON rendering; `{:#}` pretty-prints.
impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let json = self.to_json();
        if f.alternate() {
            write!(f, "{json:#}")
        } else {
            write!(f, "{json}")
        }
    }
}
