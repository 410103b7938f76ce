use jmig_model::{Decomposition, FieldType};
use serde::Serialize;

/// Result of disambiguating one compound field.
///
/// `NeedsInput` and `Ambiguous` are recoverable: the caller supplies a
/// corrected string and tries again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Resolved(Decomposition),
    NeedsInput(NeedsInput),
    Ambiguous(Ambiguous),
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn decomposition(&self) -> Option<&Decomposition> {
        match self {
            Self::Resolved(decomposition) => Some(decomposition),
            _ => None,
        }
    }

    pub fn into_decomposition(self) -> Option<Decomposition> {
        match self {
            Self::Resolved(decomposition) => Some(decomposition),
            _ => None,
        }
    }

    /// Human-readable explanation for unresolved outcomes.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Resolved(_) => None,
            Self::NeedsInput(needs) => Some(&needs.diagnostic),
            Self::Ambiguous(ambiguous) => Some(&ambiguous.diagnostic),
        }
    }
}

/// Too few values and no recovery rule applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeedsInput {
    pub raw: String,
    pub pieces: Vec<String>,
    pub expected: usize,
    pub diagnostic: String,
}

/// No unique valid split exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ambiguous {
    pub raw: String,
    /// Best-effort field text with internal delimiters escaped, for review.
    pub escaped: String,
    pub reason: AmbiguityReason,
    pub diagnostic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmbiguityReason {
    /// The scan filled a different number of slots than the schema has.
    SlotCount { found: usize, expected: usize },
    /// A slot's value failed its type validator.
    InvalidValue {
        field: String,
        field_type: FieldType,
        value: String,
    },
}
