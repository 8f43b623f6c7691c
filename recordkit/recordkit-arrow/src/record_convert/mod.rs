//! Conversion from [`Record`]s to an Arrow `RecordBatch`.
//!
//! Columns follow the entries of the schema; each record fills one row,
//! reading fields by entry name. Absent fields become nulls.

mod append;
mod builder;
mod scalar;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use recordkit_core::{Record, Schema};

use crate::{error::ArrowConvertError, schema_convert::schema_to_arrow_schema};

/// Converts records sharing `schema` into a `RecordBatch`.
///
/// Values are written as stored; no read-time coercion is applied, so a
/// field whose value kind does not match its column fails with
/// [`ArrowConvertError::ValueType`]. An empty slice yields an empty batch.
pub fn records_to_record_batch(
    schema: &Schema,
    records: &[Record],
) -> Result<RecordBatch, ArrowConvertError> {
    let arrow_schema = Arc::new(schema_to_arrow_schema(schema)?);
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(arrow_schema.fields().len());

    for field in arrow_schema.fields() {
        let column = field.name();
        let mut builder = builder::make_builder(field.data_type(), records.len())?;
        for record in records {
            let value = record.value(column);
            append::require_value(field, value, column)?;
            append::append_value_to_builder(&mut builder, field.data_type(), value, column)?;
        }
        arrays.push(builder.finish());
    }

    let options = RecordBatchOptions::new().with_row_count(Some(records.len()));
    Ok(RecordBatch::try_new_with_options(
        arrow_schema,
        arrays,
        &options,
    )?)
}
