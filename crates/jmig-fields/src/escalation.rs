//! Caller-provided strategies for correcting unresolved fields.
//!
//! The disambiguator never prompts or performs lookups itself. An
//! [`Escalation`] is handed the diagnostic and may return a corrected raw
//! string, which is disambiguated once more.

use std::collections::HashMap;

use jmig_model::{FieldLocation, Schema};

use crate::outcome::Outcome;

pub struct EscalationRequest<'a> {
    pub raw: &'a str,
    pub schema: &'a Schema,
    pub location: Option<&'a FieldLocation>,
    /// The unresolved outcome being escalated.
    pub outcome: &'a Outcome,
}

impl EscalationRequest<'_> {
    pub fn diagnostic(&self) -> &str {
        self.outcome.diagnostic().unwrap_or_default()
    }
}

pub trait Escalation {
    /// Returns a corrected raw string, or `None` to leave the field
    /// unresolved.
    fn correct(&self, request: &EscalationRequest<'_>) -> Option<String>;
}

/// Declines every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscalation;

impl Escalation for NoEscalation {
    fn correct(&self, _request: &EscalationRequest<'_>) -> Option<String> {
        None
    }
}

impl<F> Escalation for F
where
    F: Fn(&EscalationRequest<'_>) -> Option<String>,
{
    fn correct(&self, request: &EscalationRequest<'_>) -> Option<String> {
        self(request)
    }
}

/// Known corrections keyed by the raw field text, such as values fetched
/// from the system of record or saved from an earlier interactive run.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    corrections: HashMap<String, String>,
}

impl CorrectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw: impl Into<String>, corrected: impl Into<String>) {
        self.corrections.insert(raw.into(), corrected.into());
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}

impl FromIterator<(String, String)> for CorrectionTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            corrections: iter.into_iter().collect(),
        }
    }
}

impl Escalation for CorrectionTable {
    fn correct(&self, request: &EscalationRequest<'_>) -> Option<String> {
        self.corrections.get(request.raw).cloned()
    }
}
