//! Schema-driven splitting of compound fields.
//!
//! A compound field joins several typed values with `;`, but free-text
//! values may contain `;` themselves. [`Disambiguator::disambiguate`] finds
//! the unique split that satisfies the schema:
//!
//! 1. A plain split with exactly one piece per slot that validates is
//!    returned as-is.
//! 2. Too few pieces: the recovery rules may fill in a missing value;
//!    otherwise the caller is asked for input.
//! 3. Otherwise a single left-to-right scan decides each delimiter. Only a
//!    text slot may keep a delimiter as content; every other slot ends at
//!    the next delimiter. While a text slot is followed only by non-text
//!    slots, the split is anchored on the right: the text keeps delimiters
//!    until exactly one piece per remaining slot is left. Otherwise the
//!    delimiter separates slots when the text after it validates as the
//!    next slot's type. The last slot takes whatever remains.
//! 4. A scan that does not fill every slot with a valid value is reported
//!    as ambiguous, with the escaped best effort attached.

use jmig_model::{
    DELIMITER, Decomposition, FieldLocation, Repair, Schema, SchemaError, TypedValue, escape,
};

use crate::escalation::{Escalation, EscalationRequest};
use crate::outcome::{AmbiguityReason, Ambiguous, NeedsInput, Outcome};
use crate::recovery::{RecoveryRule, standard_rules};
use crate::validate::ValidatorTable;

#[derive(Debug)]
pub struct Disambiguator<'a> {
    schema: Schema,
    validators: &'a ValidatorTable,
    rules: Vec<RecoveryRule>,
}

impl<'a> Disambiguator<'a> {
    /// Binds a schema to a validator table with the standard recovery rules.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MissingValidator`] when a slot type has no validator.
    pub fn new(schema: Schema, validators: &'a ValidatorTable) -> Result<Self, SchemaError> {
        validators.check(&schema)?;
        Ok(Self {
            schema,
            validators,
            rules: standard_rules(),
        })
    }

    /// Replaces the recovery rules.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<RecoveryRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn disambiguate(&self, raw: &str) -> Outcome {
        let pieces: Vec<&str> = raw.split(DELIMITER).collect();
        let expected = self.schema.len();

        if pieces.len() == expected
            && let Some(values) = self.validate_pieces(&pieces)
        {
            return Outcome::Resolved(Decomposition::new(values, Repair::None));
        }
        if pieces.len() < expected {
            return self.recover(raw, &pieces);
        }
        self.scan(raw)
    }

    /// Disambiguates `raw`, escalating once when it stays unresolved.
    ///
    /// A corrected string that resolves is marked [`Repair::Supplied`].
    pub fn resolve_with(
        &self,
        raw: &str,
        location: Option<&FieldLocation>,
        escalation: &dyn Escalation,
    ) -> Outcome {
        let outcome = self.disambiguate(raw);
        if outcome.is_resolved() {
            return outcome;
        }
        let request = EscalationRequest {
            raw,
            schema: &self.schema,
            location,
            outcome: &outcome,
        };
        let Some(corrected) = escalation.correct(&request) else {
            return outcome;
        };
        match self.disambiguate(&corrected) {
            Outcome::Resolved(decomposition) => {
                Outcome::Resolved(decomposition.with_repair(Repair::Supplied))
            }
            unresolved => unresolved,
        }
    }

    fn validate_pieces<S: AsRef<str>>(&self, pieces: &[S]) -> Option<Vec<TypedValue>> {
        self.schema
            .fields()
            .iter()
            .zip(pieces)
            .map(|(field, piece)| {
                let piece = piece.as_ref();
                self.validators
                    .is_valid(field.field_type, piece)
                    .then(|| TypedValue {
                        field_name: field.name.clone(),
                        field_type: field.field_type,
                        value: piece.to_string(),
                        escaped: false,
                    })
            })
            .collect()
    }

    fn recover(&self, raw: &str, pieces: &[&str]) -> Outcome {
        for rule in &self.rules {
            let Some(candidate) = (rule.apply)(pieces, &self.schema, self.validators) else {
                continue;
            };
            if candidate.len() == self.schema.len()
                && let Some(values) = self.validate_pieces(&candidate)
            {
                let repair = Repair::Recovered {
                    rule: rule.name.to_string(),
                };
                return Outcome::Resolved(Decomposition::new(values, repair));
            }
        }
        Outcome::NeedsInput(NeedsInput {
            raw: raw.to_string(),
            pieces: pieces.iter().map(|piece| (*piece).to_string()).collect(),
            expected: self.schema.len(),
            diagnostic: format!(
                "found {} of {} values ({}) and no recovery rule applies",
                pieces.len(),
                self.schema.len(),
                self.schema.describe()
            ),
        })
    }

    fn scan(&self, raw: &str) -> Outcome {
        let fields = self.schema.fields();
        let last = fields.len() - 1;

        // Byte ranges of each slot within `raw`.
        let mut bounds: Vec<(usize, usize)> = Vec::with_capacity(fields.len());
        let mut start = 0;
        let delimiters: Vec<usize> = raw.match_indices(DELIMITER).map(|(at, _)| at).collect();
        for (index, &offset) in delimiters.iter().enumerate() {
            let slot = bounds.len();
            if slot == last {
                break;
            }
            let next_start = offset + DELIMITER.len_utf8();
            if fields[slot].field_type.holds_delimiters() {
                let pieces_left = delimiters.len() - index;
                let slots_left = last - slot;
                let anchored = fields[slot + 1..]
                    .iter()
                    .all(|field| !field.field_type.holds_delimiters());
                if anchored && pieces_left > slots_left {
                    continue;
                }
                let next_end = delimiters.get(index + 1).copied().unwrap_or(raw.len());
                let next_type = fields[slot + 1].field_type;
                if !self
                    .validators
                    .is_valid(next_type, &raw[next_start..next_end])
                {
                    continue;
                }
            }
            bounds.push((start, offset));
            start = next_start;
        }
        bounds.push((start, raw.len()));

        let mut escaped_count = 0;
        let values: Vec<TypedValue> = bounds
            .iter()
            .zip(fields)
            .map(|(&(from, to), field)| {
                let text = &raw[from..to];
                let internal = text.matches(DELIMITER).count();
                escaped_count += internal;
                TypedValue {
                    field_name: field.name.clone(),
                    field_type: field.field_type,
                    value: if internal > 0 {
                        escape(text)
                    } else {
                        text.to_string()
                    },
                    escaped: internal > 0,
                }
            })
            .collect();
        let escaped = join_values(&values);

        if values.len() != fields.len() {
            return Outcome::Ambiguous(Ambiguous {
                raw: raw.to_string(),
                diagnostic: format!(
                    "only {} of {} values ({}) could be separated; best effort: {}",
                    values.len(),
                    fields.len(),
                    self.schema.describe(),
                    escaped
                ),
                escaped,
                reason: AmbiguityReason::SlotCount {
                    found: values.len(),
                    expected: fields.len(),
                },
            });
        }

        // Validators see the original text, never escape tokens.
        if let Some(invalid) = values.iter().find(|typed| {
            (typed.escaped && !typed.field_type.holds_delimiters())
                || !self.validators.is_valid(typed.field_type, &typed.content())
        }) {
            let value = invalid.content();
            return Outcome::Ambiguous(Ambiguous {
                raw: raw.to_string(),
                diagnostic: format!(
                    "value {:?} is not a valid {} for {:?}; best effort: {}",
                    value, invalid.field_type, invalid.field_name, escaped
                ),
                reason: AmbiguityReason::InvalidValue {
                    field: invalid.field_name.clone(),
                    field_type: invalid.field_type,
                    value,
                },
                escaped,
            });
        }

        let repair = if escaped_count > 0 {
            Repair::Escaped {
                count: escaped_count,
            }
        } else {
            Repair::None
        };
        Outcome::Resolved(Decomposition::new(values, repair))
    }
}

fn join_values(values: &[TypedValue]) -> String {
    values
        .iter()
        .map(|typed| typed.value.as_str())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// One-shot form of [`Disambiguator::disambiguate`].
///
/// # Errors
///
/// [`SchemaError::MissingValidator`] when a slot type has no validator.
pub fn disambiguate(
    raw: &str,
    schema: &Schema,
    validators: &ValidatorTable,
) -> Result<Outcome, SchemaError> {
    Ok(Disambiguator::new(schema.clone(), validators)?.disambiguate(raw))
}
