//! Decomposed compound-field values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::escape::unescape;
use crate::field::FieldType;

/// Separator between sub-values of a compound field.
pub const DELIMITER: char = ';';

/// A raw substring assigned to one schema slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedValue {
    pub field_name: String,
    pub field_type: FieldType,
    /// Stored text; contains escape tokens when `escaped` is set.
    pub value: String,
    /// Whether internal delimiters in this slot were replaced by escape tokens.
    pub escaped: bool,
}

impl TypedValue {
    /// The original text of this slot, with escape tokens reversed.
    pub fn content(&self) -> String {
        if self.escaped {
            unescape(&self.value)
        } else {
            self.value.clone()
        }
    }
}

/// How a decomposition was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Repair {
    /// The raw field split cleanly.
    None,
    /// Internal delimiters were escaped.
    Escaped { count: usize },
    /// A recovery rule filled in a missing value.
    Recovered { rule: String },
    /// The caller's escalation path supplied a corrected string.
    Supplied,
}

impl Repair {
    pub fn is_modified(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One validated value per schema slot.
///
/// Built atomically by the disambiguator; the length always equals the
/// schema length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    values: Vec<TypedValue>,
    repair: Repair,
}

impl Decomposition {
    pub fn new(values: Vec<TypedValue>, repair: Repair) -> Self {
        Self { values, repair }
    }

    pub fn values(&self) -> &[TypedValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<TypedValue> {
        self.values
    }

    pub fn repair(&self) -> &Repair {
        &self.repair
    }

    pub fn with_repair(mut self, repair: Repair) -> Self {
        self.repair = repair;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, field_name: &str) -> Option<&TypedValue> {
        self.values.iter().find(|value| value.field_name == field_name)
    }

    /// First value with the given type.
    pub fn first_of(&self, field_type: FieldType) -> Option<&TypedValue> {
        self.values.iter().find(|value| value.field_type == field_type)
    }

    /// Replaces the stored text of a slot. Returns false when no slot has
    /// that name.
    pub fn set(&mut self, field_name: &str, value: impl Into<String>) -> bool {
        match self
            .values
            .iter_mut()
            .find(|typed| typed.field_name == field_name)
        {
            Some(typed) => {
                typed.value = value.into();
                typed.escaped = false;
                true
            }
            None => false,
        }
    }

    /// The compound field text to persist: stored values joined by the
    /// delimiter.
    pub fn to_field(&self) -> String {
        let mut out = String::new();
        for (index, typed) in self.values.iter().enumerate() {
            if index > 0 {
                out.push(DELIMITER);
            }
            out.push_str(&typed.value);
        }
        out
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

/// Position of a raw field in the record store, used only in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLocation {
    /// 1-based data row (the header is row 0).
    pub row: usize,
    pub column: String,
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {:?}", self.row, self.column)
    }
}

/// What a batch run does with a value it cannot resolve.
///
/// The same policy applies to unrecognized dates and to compound fields that
/// stay ambiguous after escalation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnUnresolved {
    /// Stop the whole run.
    #[default]
    Abort,
    /// Leave the value untouched and continue with the next one.
    Skip,
}
