//! Caller-supplied canonical output patterns.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::TemporalError;
use crate::normalize::Recognized;

/// A validated strftime pattern used to render canonical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatSpec(String);

impl FormatSpec {
    /// Day-first format this tool writes back into exports. The
    /// [`crate::SourceFormat::RoundTrip`] slot recognizes it, so normalizing
    /// an already normalized value is a no-op.
    pub const ROUND_TRIP: &'static str = "%d/%m/%Y_%H:%M";

    pub fn new(pattern: impl Into<String>) -> Result<Self, TemporalError> {
        let pattern = pattern.into();
        let invalid = pattern.trim().is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(TemporalError::InvalidFormat { pattern });
        }
        Ok(Self(pattern))
    }

    pub fn round_trip() -> Self {
        Self(Self::ROUND_TRIP.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats a recognized value. Values carrying an offset are rendered in
    /// their own offset; values without one fail on offset directives.
    pub fn render(&self, value: &Recognized) -> Result<String, TemporalError> {
        let render_error = || TemporalError::Render {
            pattern: self.0.clone(),
            format: value.format,
        };
        let mut out = String::new();
        let written = match value.offset {
            Some(offset) => {
                let zoned = value
                    .datetime
                    .and_local_timezone(offset)
                    .single()
                    .ok_or_else(render_error)?;
                write!(out, "{}", zoned.format(&self.0))
            }
            None => write!(out, "{}", value.datetime.format(&self.0)),
        };
        written.map_err(|_| render_error())?;
        Ok(out)
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::round_trip()
    }
}

impl TryFrom<String> for FormatSpec {
    type Error = TemporalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FormatSpec> for String {
    fn from(value: FormatSpec) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_directive() {
        assert!(FormatSpec::new("%Y-%m-%d").is_ok());
        assert_eq!(
            FormatSpec::new("%Y-%Q"),
            Err(TemporalError::InvalidFormat {
                pattern: "%Y-%Q".to_string()
            })
        );
        assert!(FormatSpec::new("  ").is_err());
    }
}
