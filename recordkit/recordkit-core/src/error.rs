//! Error types for schema construction and record building.

use crate::schema::Type;

/// Error returned when freezing a [`Schema`](crate::Schema) or an
/// [`Entry`](crate::Entry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// An entry builder was frozen without a name.
    #[error("entry has no name")]
    MissingEntryName,

    /// An entry builder was given an empty name.
    #[error("entry name must not be empty")]
    EmptyEntryName,

    /// An entry builder was frozen without a type.
    #[error("entry '{name}' has no type")]
    MissingEntryType { name: String },

    /// Two entries of the same schema share a name.
    #[error("duplicate entry '{name}' in schema")]
    DuplicateEntry { name: String },

    /// An `ARRAY` or `RECORD` entry of a schema carries no element schema.
    #[error("entry '{name}' of type {entry_type} has no element schema")]
    MissingElementSchema { name: String, entry_type: Type },
}

/// Error returned by [`RecordBuilder`](crate::RecordBuilder) setters, by
/// `build()`, and by typed [`Record`](crate::Record) access.
///
/// Every variant is attributable to the single call that produced it; the
/// builder keeps the fields it had already accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The field name is not declared by the provided schema.
    #[error("no entry '{name}' expected in provided schema: [{}]", known.join(", "))]
    UnknownEntry { name: String, known: Vec<String> },

    /// The declared entry type differs from the type implied by the setter.
    #[error("entry '{name}' expected to be a {expected}, got a {actual}")]
    TypeMismatch {
        name: String,
        expected: Type,
        actual: Type,
    },

    /// The value's shape is not accepted by the declared type.
    #[error("entry '{name}' of type {declared} is not compatible with a {value} value")]
    IncompatibleValue {
        name: String,
        declared: Type,
        value: &'static str,
    },

    /// A null was written to a non-nullable entry.
    #[error("entry '{name}' is not nullable")]
    NotNullable { name: String },

    /// An `ARRAY` or `RECORD` entry used for a write carries no element schema.
    #[error("entry '{name}' of type {entry_type} has no element schema")]
    MissingElementSchema { name: String, entry_type: Type },

    /// Non-nullable entries of the provided schema were never set.
    #[error("missing required entries: {}", names.join(", "))]
    MissingRequiredEntries { names: Vec<String> },

    /// A stored value cannot be converted to the requested representation.
    #[error("no known coercion from {from} to {to} for entry '{name}'")]
    NoCoercion {
        name: String,
        from: &'static str,
        to: &'static str,
    },
}
