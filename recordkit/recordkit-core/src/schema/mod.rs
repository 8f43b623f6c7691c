//! Schema model: field types, entries, schemas and their builders.

mod builder;
mod format;
mod types;

pub use builder::{EntryBuilder, SchemaBuilder};
pub use format::format_schema;
pub use types::{Entry, Schema, Type};
