use std::{collections::HashSet, sync::Arc};

use crate::{error::SchemaError, props::Props};

use super::types::{Entry, Schema, Type};

/// Accumulates the parts of a [`Schema`] and freezes them with [`build`](Self::build).
///
/// The type defaults to [`Type::Record`]. Properties follow the
/// [`Props`] merge rule.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema_type: Type,
    entries: Vec<Entry>,
    props: Props,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self {
            schema_type: Type::Record,
            entries: Vec::new(),
            props: Props::new(),
        }
    }
}

impl SchemaBuilder {
    pub fn with_type(mut self, schema_type: Type) -> Self {
        self.schema_type = schema_type;
        self
    }

    /// Appends an entry; names are checked once, in [`build`](Self::build).
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key, value);
        self
    }

    pub fn with_props<K, V>(mut self, props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.props.merge(props);
        self
    }

    /// Freezes the schema.
    ///
    /// Fails on duplicate entry names and on `ARRAY`/`RECORD` entries without
    /// an element schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(SchemaError::DuplicateEntry {
                    name: entry.name.clone(),
                });
            }
            if entry.entry_type.needs_element_schema() && entry.element_schema.is_none() {
                return Err(SchemaError::MissingElementSchema {
                    name: entry.name.clone(),
                    entry_type: entry.entry_type,
                });
            }
        }

        Ok(Schema {
            schema_type: self.schema_type,
            entries: self.entries,
            props: self.props,
        })
    }
}

/// Accumulates the parts of an [`Entry`].
///
/// Entries are non-nullable unless [`with_nullable`](Self::with_nullable) says
/// otherwise.
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    name: Option<String>,
    raw_name: Option<String>,
    entry_type: Option<Type>,
    nullable: bool,
    element_schema: Option<Arc<Schema>>,
    comment: Option<String>,
    props: Props,
}

impl EntryBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_raw_name(mut self, raw_name: impl Into<String>) -> Self {
        self.raw_name = Some(raw_name.into());
        self
    }

    pub fn with_type(mut self, entry_type: Type) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_element_schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.element_schema = Some(schema.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key, value);
        self
    }

    pub fn with_props<K, V>(mut self, props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.props.merge(props);
        self
    }

    /// Freezes the entry. A name and a type are required.
    ///
    /// The element schema is not required here: it is checked when the entry
    /// joins a schema, or when a value is written through it.
    pub fn build(self) -> Result<Entry, SchemaError> {
        let name = self.name.ok_or(SchemaError::MissingEntryName)?;
        if name.is_empty() {
            return Err(SchemaError::EmptyEntryName);
        }
        let entry_type = self
            .entry_type
            .ok_or_else(|| SchemaError::MissingEntryType { name: name.clone() })?;

        Ok(Entry {
            name,
            raw_name: self.raw_name,
            entry_type,
            nullable: self.nullable,
            element_schema: self.element_schema,
            comment: self.comment,
            props: self.props,
        })
    }
}
