//! Plain-text rendering for the `date` and `split` commands.

use std::fmt::Write as _;

use jmig_fields::{AmbiguityReason, Outcome};
use jmig_model::Repair;
use jmig_temporal::TemporalCandidate;

/// One line per value: input, recognized source format, canonical text.
pub fn render_candidates(candidates: &[TemporalCandidate]) -> String {
    let width = candidates
        .iter()
        .map(|candidate| candidate.source.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for candidate in candidates {
        let format = candidate.format.map_or("-", |format| format.label());
        let canonical = candidate.canonical.as_deref().unwrap_or("unrecognized");
        let _ = writeln!(
            out,
            "{:<width$}  {:<30}  {}",
            candidate.source, format, canonical
        );
    }
    out
}

pub fn render_outcome(outcome: &Outcome) -> String {
    let mut out = String::new();
    match outcome {
        Outcome::Resolved(decomposition) => {
            let width = decomposition
                .values()
                .iter()
                .map(|typed| typed.field_name.len())
                .max()
                .unwrap_or(0);
            let _ = writeln!(out, "resolved ({})", describe_repair(decomposition.repair()));
            for typed in decomposition.values() {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {:<8}  {}",
                    typed.field_name,
                    typed.field_type.as_str(),
                    typed.value
                );
            }
            let _ = writeln!(out, "field: {}", decomposition.to_field());
        }
        Outcome::NeedsInput(needs) => {
            let _ = writeln!(out, "needs input: {}", needs.diagnostic);
            for (index, piece) in needs.pieces.iter().enumerate() {
                let _ = writeln!(out, "  [{index}] {piece}");
            }
        }
        Outcome::Ambiguous(ambiguous) => {
            let reason = match &ambiguous.reason {
                AmbiguityReason::SlotCount { found, expected } => {
                    format!("{found} of {expected} slots filled")
                }
                AmbiguityReason::InvalidValue {
                    field, field_type, ..
                } => format!("{field} is not a valid {field_type}"),
            };
            let _ = writeln!(out, "ambiguous: {reason}");
            let _ = writeln!(out, "  best effort: {}", ambiguous.escaped);
        }
    }
    out
}

fn describe_repair(repair: &Repair) -> String {
    match repair {
        Repair::None => "clean split".to_string(),
        Repair::Escaped { count: 1 } => "1 delimiter escaped".to_string(),
        Repair::Escaped { count } => format!("{count} delimiters escaped"),
        Repair::Recovered { rule } => format!("recovered by {rule}"),
        Repair::Supplied => "corrected by escalation".to_string(),
    }
}
