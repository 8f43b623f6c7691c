use arrow::error::ArrowError;
use recordkit_core::{SchemaError, Type};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
    /// A schema shape with no Arrow counterpart, e.g. a non-RECORD root or an
    /// array whose element is itself an array. `name` is empty for the root.
    #[error("cannot map {entry_type} schema of '{name}' to an Arrow type")]
    UnsupportedElement { name: String, entry_type: Type },
    #[error("column '{column}': expected {expected}, got {actual}")]
    ValueType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
