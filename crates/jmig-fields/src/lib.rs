//! Splitting of semicolon-delimited compound fields against a schema.
//!
//! Jira exports pack several typed values into one cell, joined by `;`,
//! while the free-text values inside may contain `;` as well. A
//! [`Disambiguator`] binds a [`Schema`](jmig_model::Schema) to a
//! [`ValidatorTable`] and reports each field as an [`Outcome`]: resolved,
//! missing input, or ambiguous. Unresolved fields can be handed to an
//! [`Escalation`] for a single corrected retry.
//!
//! # Example
//!
//! ```
//! use jmig_fields::{Disambiguator, default_table};
//! use jmig_model::Schema;
//!
//! let schema = Schema::from_tags(&["datetime", "comment", "username"]).unwrap();
//! let splitter = Disambiguator::new(schema, default_table()).unwrap();
//! let outcome = splitter.disambiguate("2021-05-01;Said: hi; bye;jdoe");
//! let decomposition = outcome.decomposition().unwrap();
//! assert_eq!(decomposition.to_field(), "2021-05-01;Said: hi%3b bye;jdoe");
//! ```

pub mod disambiguate;
pub mod escalation;
pub mod outcome;
pub mod recovery;
pub mod validate;

pub use disambiguate::{Disambiguator, disambiguate};
pub use escalation::{CorrectionTable, Escalation, EscalationRequest, NoEscalation};
pub use outcome::{AmbiguityReason, Ambiguous, NeedsInput, Outcome};
pub use recovery::{RecoveryFn, RecoveryRule, UNKNOWN_USERNAME, standard_rules};
pub use validate::{
    DatetimeValidator, FieldValidator, FilenameValidator, IntegerValidator, LocationValidator,
    PredicateValidator, TextValidator, UsernameValidator, ValidatorTable, default_table,
};
