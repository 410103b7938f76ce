use thiserror::Error;

use crate::patterns::SourceFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("empty date/time value")]
    Empty,

    /// No pattern slot matched and the serial-date fallback failed, or the
    /// first matching slot could not be parsed into a calendar value.
    #[error("unrecognized date/time value {input:?}")]
    Unrecognized {
        input: String,
        /// The slot that matched before calendar parsing failed, if any.
        matched: Option<SourceFormat>,
    },

    #[error("invalid output format pattern {pattern:?}")]
    InvalidFormat { pattern: String },

    #[error("cannot render {format} value with pattern {pattern:?}")]
    Render {
        pattern: String,
        format: SourceFormat,
    },
}
