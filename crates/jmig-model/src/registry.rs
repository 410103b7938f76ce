//! Mapping from compound-field names to schemas.
//!
//! The mapping is configuration data. Builtin entries cover the Jira export
//! fields; a [`SchemaTable`] deserialized from configuration can add or
//! override entries:
//!
//! ```toml
//! [schemas]
//! attachment = ["datetime", "username", "filename", "location"]
//! "log work" = [
//!     { name = "comment", type = "text" },
//!     { name = "started", type = "datetime" },
//!     { name = "author", type = "username" },
//!     { name = "seconds", type = "integer" },
//! ]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{RegistryError, SchemaError};
use crate::field::{FieldSpec, FieldType, Schema};

/// A schema entry as written in configuration: a bare type tag, or an
/// explicit name and type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Tag(String),
    Spec(FieldSpec),
}

impl FieldEntry {
    fn into_spec(self) -> Result<FieldSpec, SchemaError> {
        match self {
            Self::Tag(tag) => FieldType::from_tag(&tag)
                .map(|field_type| FieldSpec::new(tag.trim().to_ascii_lowercase(), field_type))
                .ok_or(SchemaError::UnknownFieldType { tag }),
            Self::Spec(spec) => Ok(spec),
        }
    }
}

/// Schema entries keyed by field name, as deserialized from configuration.
pub type SchemaTable = BTreeMap<String, Vec<FieldEntry>>;

const BUILTIN: &[(&str, &[&str])] = &[
    ("attachment", &["datetime", "username", "filename", "location"]),
    ("comment", &["datetime", "username", "comment"]),
    ("logwork", &["comment", "datetime", "username", "seconds"]),
];

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the attachment, comment and log work schemas.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (name, tags) in BUILTIN {
            let schema = Schema::from_tags(tags).expect("builtin schemas are valid");
            registry.insert(name, schema);
        }
        registry
    }

    /// Adds or replaces entries. Nothing is inserted if any entry is invalid.
    pub fn extend(&mut self, table: SchemaTable) -> Result<(), RegistryError> {
        let mut parsed = Vec::with_capacity(table.len());
        for (name, entries) in table {
            let schema = entries
                .into_iter()
                .map(FieldEntry::into_spec)
                .collect::<Result<Vec<_>, _>>()
                .and_then(Schema::new)
                .map_err(|source| RegistryError::Schema {
                    name: name.clone(),
                    source,
                })?;
            parsed.push((name, schema));
        }
        for (name, schema) in parsed {
            self.insert(&name, schema);
        }
        Ok(())
    }

    pub fn insert(&mut self, name: &str, schema: Schema) {
        self.schemas.insert(normalize_key(name), schema);
    }

    /// Looks up a schema by field name or CSV header ("Log Work" finds
    /// `logwork`).
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(&normalize_key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
