//! Typed schema slots.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The closed set of sub-value types a compound field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Datetime,
    Username,
    Filename,
    Location,
    Integer,
    /// Free text such as a comment body; accepts anything.
    Text,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Datetime,
        FieldType::Username,
        FieldType::Filename,
        FieldType::Location,
        FieldType::Integer,
        FieldType::Text,
    ];

    /// Resolves a schema tag as written in exports and configuration.
    ///
    /// `seconds` and `comment` are the tags used by the Log Work and Comment
    /// fields; they map onto `Integer` and `Text`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "datetime" | "date" => Some(Self::Datetime),
            "username" | "user" | "author" => Some(Self::Username),
            "filename" => Some(Self::Filename),
            "location" | "url" => Some(Self::Location),
            "integer" | "seconds" => Some(Self::Integer),
            "text" | "comment" => Some(Self::Text),
            _ => None,
        }
    }

    /// Only free text may contain the delimiter as content.
    pub fn holds_delimiters(self) -> bool {
        matches!(self, Self::Text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Datetime => "datetime",
            Self::Username => "username",
            Self::Filename => "filename",
            Self::Location => "location",
            Self::Integer => "integer",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed slot of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered slot list a compound field decomposes into.
///
/// Names are unique and the order defines positional semantics, so a schema
/// can only be built through [`Schema::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Builds a schema whose slot names are the type tags themselves, the
    /// way export schemas are written (`datetime;username;filename;location`).
    pub fn from_tags(tags: &[&str]) -> Result<Self, SchemaError> {
        let fields = tags
            .iter()
            .map(|tag| {
                FieldType::from_tag(tag)
                    .map(|field_type| FieldSpec::new(tag.trim().to_ascii_lowercase(), field_type))
                    .ok_or_else(|| SchemaError::UnknownFieldType {
                        tag: (*tag).to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(fields)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Index of the first slot with the given type.
    pub fn position_of(&self, field_type: FieldType) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.field_type == field_type)
    }

    pub fn types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.fields.iter().map(|field| field.field_type)
    }

    /// Slot names joined with the delimiter, for diagnostics.
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(|field| field.name.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }
}
