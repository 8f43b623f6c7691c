use std::fmt::{Error, Result, Write as _};

use crate::props::Props;

use super::{Entry, Schema, Type};

/// Format a schema in a readable outline:
/// scalar entries without properties are rendered in one line, other entries
/// are expanded into blocks. Nested schemas follow the same rule.
pub fn format_schema(schema: &Schema) -> std::result::Result<String, Error> {
    let mut out = String::new();

    for entry in schema.entries() {
        format_entry(entry, 0, &mut out)?;
    }
    format_props(schema.props(), 0, &mut out)?;

    Ok(out)
}

fn format_entry(entry: &Entry, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    let entry_type = entry.entry_type();
    if entry_type.is_primitive() && entry.props().is_empty() {
        return writeln!(
            out,
            "{pad}{}: {{ type: {entry_type}, nullable: {} }}",
            entry.name(),
            entry.is_nullable()
        );
    }

    let inner = " ".repeat(indent + 4);
    writeln!(out, "{pad}{}:", entry.name())?;
    writeln!(out, "{inner}type: {entry_type}")?;
    writeln!(out, "{inner}nullable: {}", entry.is_nullable())?;

    match (entry_type, entry.element_schema()) {
        (Type::Record, Some(schema)) => format_fields(schema, indent + 4, out)?,
        (Type::Array, Some(schema)) => {
            writeln!(out, "{inner}element:")?;
            writeln!(out, "{inner}    type: {}", schema.schema_type())?;
            if !schema.entries().is_empty() {
                format_fields(schema, indent + 8, out)?;
            }
        }
        _ => (),
    }

    format_props(entry.props(), indent + 4, out)
}

fn format_fields(schema: &Schema, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}fields:")?;
    for child in schema.entries() {
        format_entry(child, indent + 4, out)?;
    }
    Ok(())
}

fn format_props(props: &Props, indent: usize, out: &mut String) -> Result {
    if props.is_empty() {
        return Ok(());
    }
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}props:")?;
    for (key, value) in props.iter() {
        writeln!(out, "{pad}    {key}: {value}")?;
    }
    Ok(())
}
