//! Schema-governed records.
//!
//! A [`Schema`] describes the shape of a record: typed, nullable [`Entry`]s
//! with nested element schemas for arrays and records, plus free-form string
//! properties. A [`RecordBuilder`] stages field writes, validating each one
//! against a provided schema or inferring the schema on the fly, and freezes
//! them into an immutable [`Record`]. Typed reads go through a [`Coercer`]
//! when the stored representation differs from the requested one.
//!
//! # Typical Flow
//! ```rust
//! use recordkit_core::{Entry, RecordBuilder, RecordError, Schema, Type};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::builder()
//!     .with_entry(Entry::builder().with_name("name").with_type(Type::String).build()?)
//!     .build()?;
//!
//! let mut builder = RecordBuilder::with_schema(schema);
//! builder.with_string("name", "ok")?;
//! let record = builder.build()?;
//! assert_eq!(record.get_string("name")?.as_deref(), Some("ok"));
//!
//! let err = RecordBuilder::with_schema(record.shared_schema()).build().unwrap_err();
//! assert!(matches!(err, RecordError::MissingRequiredEntries { .. }));
//! # Ok(())
//! # }
//! ```

mod builder;
mod coerce;
mod error;
mod policy;
mod props;
mod record;
mod render;
mod schema;
mod value;

pub use builder::RecordBuilder;
pub use coerce::{Coerced, Coercer, DefaultCoercer, FromValue, Repr};
pub use error::{RecordError, SchemaError};
pub use policy::{BuildPolicy, DuplicateEntryPolicy, NullDateTimePolicy};
pub use props::Props;
pub use record::Record;
pub use schema::{Entry, EntryBuilder, Schema, SchemaBuilder, Type, format_schema};
pub use value::{DateTimeValue, FieldValue, Value};
