use thiserror::Error;

use crate::field::FieldType;

/// Schema and validator-table inconsistencies.
///
/// These are programming or configuration errors. They surface when a schema
/// or disambiguator is constructed, before any record is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema must contain at least one field")]
    Empty,
    #[error("duplicate field name in schema: {name}")]
    DuplicateField { name: String },
    #[error("unknown field type tag: {tag}")]
    UnknownFieldType { tag: String },
    #[error("no validator registered for field type {field_type}")]
    MissingValidator { field_type: FieldType },
}

/// A configured schema entry that cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid schema {name}: {source}")]
    Schema {
        name: String,
        #[source]
        source: SchemaError,
    },
}
