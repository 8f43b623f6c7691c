//! Arrow interchange for `recordkit`.
//!
//! Two entry points:
//! - [`schema_to_arrow_schema`] maps a RECORD [`Schema`](recordkit_core::Schema)
//!   to an Arrow schema.
//! - [`records_to_record_batch`] writes records sharing that schema into a
//!   `RecordBatch`.
//!
//! DATETIME columns are millisecond `Timestamp`s in UTC; ARRAY entries become
//! `List` columns and RECORD entries become `Struct` columns.
//!
//! # Typical Flow
//! ```rust
//! use recordkit_arrow::records_to_record_batch;
//! use recordkit_core::{Entry, RecordBuilder, Schema, Type};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::builder()
//!     .with_entry(Entry::builder().with_name("id").with_type(Type::Long).build()?)
//!     .build()?;
//!
//! let mut builder = RecordBuilder::with_schema(schema.clone());
//! builder.with_long("id", 1)?;
//! let record = builder.build()?;
//!
//! let batch = records_to_record_batch(&schema, &[record])?;
//! assert_eq!(batch.num_rows(), 1);
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod record_convert;
pub mod schema_convert;

pub use error::ArrowConvertError;
pub use record_convert::records_to_record_batch;
pub use schema_convert::schema_to_arrow_schema;

pub(crate) const TIMESTAMP_TZ: &str = "+00:00";
