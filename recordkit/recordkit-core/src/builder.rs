//! Staging object that validates field writes and freezes them into a [`Record`].

use std::{
    cell::OnceCell,
    collections::{HashMap, hash_map::Entry as Slot},
    sync::Arc,
};

use crate::{
    error::RecordError,
    policy::{BuildPolicy, DuplicateEntryPolicy, NullDateTimePolicy},
    props::Props,
    record::Record,
    schema::{Entry, Schema, Type},
    value::{DateTimeValue, FieldValue, Value},
};

/// Mutable, single-writer builder of a [`Record`].
///
/// With a provided schema every write is checked against the declared entry
/// of the same name. Without one (free-form mode) each write synthesizes a
/// nullable entry and the record schema is assembled from them at
/// [`build`](Self::build).
///
/// A failed write returns an error and leaves previously accepted fields in
/// place.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    provided_schema: Option<Arc<Schema>>,
    policy: BuildPolicy,
    values: HashMap<String, Value>,
    entries: Vec<Entry>,
    entry_index: OnceCell<HashMap<String, usize>>,
}

macro_rules! primitive_setters {
    ($($by_name:ident, $by_entry:ident, $ty:ty, $kind:ident;)*) => {
        $(
            #[doc = concat!("Sets a `", stringify!($kind), "` field by name.")]
            pub fn $by_name(
                &mut self,
                name: &str,
                value: impl Into<$ty>,
            ) -> Result<&mut Self, RecordError> {
                let entry = self.find_or_build_entry(name, Type::$kind)?;
                self.$by_entry(&entry, value)
            }

            #[doc = concat!("Sets a `", stringify!($kind), "` field through an explicit entry.")]
            pub fn $by_entry(
                &mut self,
                entry: &Entry,
                value: impl Into<$ty>,
            ) -> Result<&mut Self, RecordError> {
                let value: $ty = value.into();
                self.set(entry, Type::$kind, FieldValue::Value(value.into()))
            }
        )*
    };
}

impl RecordBuilder {
    /// Free-form builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder validating every write against `schema`.
    pub fn with_schema(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            provided_schema: Some(schema.into()),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: BuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn provided_schema(&self) -> Option<&Schema> {
        self.provided_schema.as_deref()
    }

    /// Value staged for `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    primitive_setters! {
        with_string, with_string_entry, String, String;
        with_bytes, with_bytes_entry, Vec<u8>, Bytes;
        with_int, with_int_entry, i32, Int;
        with_long, with_long_entry, i64, Long;
        with_float, with_float_entry, f32, Float;
        with_double, with_double_entry, f64, Double;
        with_boolean, with_boolean_entry, bool, Boolean;
    }

    /// Sets a `DATETIME` field from any temporal input, stored as epoch millis.
    pub fn with_date_time(
        &mut self,
        name: &str,
        value: impl Into<DateTimeValue>,
    ) -> Result<&mut Self, RecordError> {
        let entry = self.find_or_build_entry(name, Type::DateTime)?;
        self.with_date_time_entry(&entry, value)
    }

    pub fn with_date_time_entry(
        &mut self,
        entry: &Entry,
        value: impl Into<DateTimeValue>,
    ) -> Result<&mut Self, RecordError> {
        self.set(entry, Type::DateTime, FieldValue::DateTime(value.into()))
    }

    /// Sets a `DATETIME` field from epoch milliseconds.
    pub fn with_timestamp(&mut self, name: &str, millis: i64) -> Result<&mut Self, RecordError> {
        let entry = self.find_or_build_entry(name, Type::DateTime)?;
        self.with_timestamp_entry(&entry, millis)
    }

    pub fn with_timestamp_entry(
        &mut self,
        entry: &Entry,
        millis: i64,
    ) -> Result<&mut Self, RecordError> {
        self.set(entry, Type::DateTime, FieldValue::Value(Value::DateTime(millis)))
    }

    /// Sets a nested record field. In free-form mode the synthesized entry
    /// uses the nested record's schema as element schema.
    pub fn with_record(&mut self, name: &str, record: Record) -> Result<&mut Self, RecordError> {
        let entry = match self.provided_schema.as_deref() {
            Some(schema) => self.find_existing_entry(schema, name)?.clone(),
            None => Entry {
                element_schema: Some(record.shared_schema()),
                ..Entry::nullable(name, Type::Record)
            },
        };
        self.with_record_entry(&entry, record)
    }

    pub fn with_record_entry(
        &mut self,
        entry: &Entry,
        record: Record,
    ) -> Result<&mut Self, RecordError> {
        self.set(entry, Type::Record, FieldValue::Value(Value::Record(record)))
    }

    /// Sets an array field declared by the provided schema.
    ///
    /// In free-form mode no element schema can be inferred, so this fails with
    /// [`RecordError::MissingElementSchema`]; use
    /// [`with_array_entry`](Self::with_array_entry) instead.
    pub fn with_array<T: Into<Value>>(
        &mut self,
        name: &str,
        items: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, RecordError> {
        let entry = self.find_or_build_entry(name, Type::Array)?;
        self.with_array_entry(&entry, items)
    }

    /// Sets an array field. Items are not checked against the element schema.
    pub fn with_array_entry<T: Into<Value>>(
        &mut self,
        entry: &Entry,
        items: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, RecordError> {
        let items = items.into_iter().map(Into::into).collect();
        self.set(entry, Type::Array, FieldValue::Value(Value::Array(items)))
    }

    /// Writes a null for `name`, which must be declared (or inferred) as
    /// `entry_type`.
    pub fn with_null(&mut self, name: &str, entry_type: Type) -> Result<&mut Self, RecordError> {
        let entry = self.find_or_build_entry(name, entry_type)?;
        self.set(&entry, entry_type, FieldValue::Null)
    }

    pub fn with_null_entry(&mut self, entry: &Entry) -> Result<&mut Self, RecordError> {
        self.set(entry, entry.entry_type(), FieldValue::Null)
    }

    /// Generic setter for callers that only know the value's shape at runtime.
    ///
    /// The entry type's compatibility predicate decides whether the value is
    /// accepted; on a `DATETIME` entry a `LONG` value is read as epoch millis.
    pub fn with(
        &mut self,
        entry: &Entry,
        value: impl Into<FieldValue>,
    ) -> Result<&mut Self, RecordError> {
        self.set(entry, entry.entry_type(), value.into())
    }

    /// Checks that every non-nullable entry of the provided schema has a
    /// value, naming all missing entries at once. Always succeeds in
    /// free-form mode.
    pub fn check_required(&self) -> Result<(), RecordError> {
        let Some(schema) = self.provided_schema.as_deref() else {
            return Ok(());
        };
        let missing: Vec<String> = schema
            .entries()
            .iter()
            .filter(|e| !e.is_nullable() && !self.values.contains_key(e.name()))
            .map(|e| e.name().to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RecordError::MissingRequiredEntries { names: missing })
        }
    }

    /// Freezes the staged values into a [`Record`].
    ///
    /// Fails like [`check_required`](Self::check_required). The record takes
    /// ownership of the staged values; the builder is consumed.
    pub fn build(self) -> Result<Record, RecordError> {
        self.check_required()?;
        match self.provided_schema {
            Some(schema) => {
                tracing::debug!(fields = self.values.len(), "built record with provided schema");
                Ok(Record::new(schema, self.values))
            }
            None => {
                let written = self.entries.len();
                let entries = match self.policy.duplicate_entries {
                    DuplicateEntryPolicy::LastWins => last_wins_by_name(self.entries),
                    DuplicateEntryPolicy::KeepAll => self.entries,
                };
                if entries.len() < written {
                    tracing::debug!(
                        written,
                        kept = entries.len(),
                        "collapsed duplicate free-form entries"
                    );
                }
                tracing::debug!(
                    fields = self.values.len(),
                    entries = entries.len(),
                    "built free-form record"
                );
                let schema = Schema {
                    schema_type: Type::Record,
                    entries,
                    props: Props::new(),
                };
                Ok(Record::new(Arc::new(schema), self.values))
            }
        }
    }

    fn find_existing_entry<'a>(
        &'a self,
        schema: &'a Schema,
        name: &str,
    ) -> Result<&'a Entry, RecordError> {
        let index = self.entry_index.get_or_init(|| {
            schema
                .entries()
                .iter()
                .enumerate()
                .map(|(i, e)| (e.name().to_string(), i))
                .collect()
        });
        index
            .get(name)
            .map(|&i| &schema.entries()[i])
            .ok_or_else(|| RecordError::UnknownEntry {
                name: name.to_string(),
                known: schema.entries().iter().map(|e| e.name().to_string()).collect(),
            })
    }

    fn find_or_build_entry(&self, name: &str, entry_type: Type) -> Result<Entry, RecordError> {
        match self.provided_schema.as_deref() {
            Some(schema) => self.find_existing_entry(schema, name).cloned(),
            None => Ok(Entry::nullable(name, entry_type)),
        }
    }

    /// Re-checks a write against the provided schema; no-op in free-form mode.
    fn validate_against_provided_schema(
        &self,
        name: &str,
        entry_type: Type,
        is_null: bool,
    ) -> Result<(), RecordError> {
        let Some(schema) = self.provided_schema.as_deref() else {
            return Ok(());
        };
        let declared = self.find_existing_entry(schema, name)?;
        if declared.entry_type() != entry_type {
            return Err(RecordError::TypeMismatch {
                name: name.to_string(),
                expected: declared.entry_type(),
                actual: entry_type,
            });
        }
        if is_null && !declared.is_nullable() {
            return Err(RecordError::NotNullable {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// `setter_type` is the type implied by the setter; a mismatch with the
    /// entry reports the entry's type as `expected`, like the provided-schema
    /// check does.
    fn set(
        &mut self,
        entry: &Entry,
        setter_type: Type,
        value: FieldValue,
    ) -> Result<&mut Self, RecordError> {
        if entry.entry_type() != setter_type {
            return Err(RecordError::TypeMismatch {
                name: entry.name().to_string(),
                expected: entry.entry_type(),
                actual: setter_type,
            });
        }
        if setter_type.needs_element_schema() && entry.element_schema().is_none() {
            return Err(RecordError::MissingElementSchema {
                name: entry.name().to_string(),
                entry_type: setter_type,
            });
        }
        self.validate_against_provided_schema(entry.name(), setter_type, value.is_null())?;
        if !setter_type.is_compatible(&value) {
            return Err(RecordError::IncompatibleValue {
                name: entry.name().to_string(),
                declared: setter_type,
                value: value.variant_name(),
            });
        }

        let stored = match value {
            FieldValue::Null => self.null_value(entry),
            FieldValue::DateTime(dt) => Some(Value::DateTime(dt.epoch_millis())),
            FieldValue::Value(Value::Long(millis)) if setter_type == Type::DateTime => {
                Some(Value::DateTime(millis))
            }
            FieldValue::Value(value) => Some(value),
        };
        self.append(entry, stored)
    }

    fn null_value(&self, entry: &Entry) -> Option<Value> {
        let sentinel = entry.entry_type() == Type::DateTime
            && entry.is_nullable()
            && self.policy.null_date_time == NullDateTimePolicy::Sentinel;
        sentinel.then_some(Value::DateTime(-1))
    }

    fn append(&mut self, entry: &Entry, value: Option<Value>) -> Result<&mut Self, RecordError> {
        match value {
            Some(value) => {
                self.values.insert(entry.name().to_string(), value);
            }
            None if !entry.is_nullable() => {
                return Err(RecordError::NotNullable {
                    name: entry.name().to_string(),
                });
            }
            None => self.drop_stale_free_form_value(entry),
        }
        if self.provided_schema.is_none() {
            self.entries.push(entry.clone());
        }
        Ok(self)
    }

    /// A free-form null retypes the field, so a staged value the new entry
    /// type does not accept is discarded. Values of the same type are kept.
    fn drop_stale_free_form_value(&mut self, entry: &Entry) {
        if self.provided_schema.is_some() {
            return;
        }
        let stale = self
            .values
            .get(entry.name())
            .is_some_and(|staged| !entry.entry_type().accepts(staged));
        if stale {
            tracing::debug!(
                field = entry.name(),
                entry_type = %entry.entry_type(),
                "null write discarded staged value of another type"
            );
            self.values.remove(entry.name());
        }
    }
}

/// Keeps one entry per name at its first position, replaced by the last write.
fn last_wins_by_name(entries: Vec<Entry>) -> Vec<Entry> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(entries.len());
    let mut kept: Vec<Entry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match positions.entry(entry.name().to_string()) {
            Slot::Occupied(slot) => kept[*slot.get()] = entry,
            Slot::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(entry);
            }
        }
    }
    kept
}
