use std::{
    fmt::{Display, Formatter, Result},
    sync::Arc,
};

use crate::{
    props::Props,
    value::{FieldValue, Value},
};

use super::builder::{EntryBuilder, SchemaBuilder};

/// Closed set of field types a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    String,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Bytes,
    DateTime,
    Array,
    Record,
}

impl Type {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Type::Array | Type::Record)
    }

    /// `ARRAY` and `RECORD` entries describe their content with an element schema.
    pub fn needs_element_schema(&self) -> bool {
        !self.is_primitive()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Type::String => "STRING",
            Type::Int => "INT",
            Type::Long => "LONG",
            Type::Float => "FLOAT",
            Type::Double => "DOUBLE",
            Type::Boolean => "BOOLEAN",
            Type::Bytes => "BYTES",
            Type::DateTime => "DATETIME",
            Type::Array => "ARRAY",
            Type::Record => "RECORD",
        }
    }

    /// Compatibility predicate: whether `value` is a legal instance of this type.
    ///
    /// Nulls are always compatible here; nullability is the entry's concern.
    /// `DATETIME` accepts epoch millis (stored or as a `LONG`) and every
    /// temporal input.
    pub fn is_compatible(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::DateTime(_) => *self == Type::DateTime,
            FieldValue::Value(value) => self.accepts(value),
        }
    }

    /// Whether a stored (non-null) value is a legal instance of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Type::String, Value::String(_))
                | (Type::Int, Value::Int(_))
                | (Type::Long, Value::Long(_))
                | (Type::Float, Value::Float(_))
                | (Type::Double, Value::Double(_))
                | (Type::Boolean, Value::Boolean(_))
                | (Type::Bytes, Value::Bytes(_))
                | (Type::DateTime, Value::DateTime(_) | Value::Long(_))
                | (Type::Array, Value::Array(_))
                | (Type::Record, Value::Record(_))
        )
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Descriptor of one schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) raw_name: Option<String>,
    pub(crate) entry_type: Type,
    pub(crate) nullable: bool,
    pub(crate) element_schema: Option<Arc<Schema>>,
    pub(crate) comment: Option<String>,
    pub(crate) props: Props,
}

impl Entry {
    pub fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    /// Nullable entry with no metadata, as synthesized for free-form records.
    pub(crate) fn nullable(name: &str, entry_type: Type) -> Self {
        Self {
            name: name.to_string(),
            raw_name: None,
            entry_type,
            nullable: true,
            element_schema: None,
            comment: None,
            props: Props::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_name(&self) -> Option<&str> {
        self.raw_name.as_deref()
    }

    /// The raw name when one was recorded, otherwise the name.
    pub fn original_field_name(&self) -> &str {
        self.raw_name.as_deref().unwrap_or(&self.name)
    }

    pub fn entry_type(&self) -> Type {
        self.entry_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn element_schema(&self) -> Option<&Schema> {
        self.element_schema.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key)
    }
}

/// Immutable description of a record (or of array elements).
///
/// Entry names are unique and keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub(crate) schema_type: Type,
    pub(crate) entries: Vec<Entry>,
    pub(crate) props: Props,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Schema of a scalar array element, e.g. `Schema::of(Type::String)`.
    pub fn of(schema_type: Type) -> Self {
        Self {
            schema_type,
            entries: Vec::new(),
            props: Props::new(),
        }
    }

    pub fn schema_type(&self) -> Type {
        self.schema_type
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key)
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_schema(self)?;
        f.write_str(&text)
    }
}
