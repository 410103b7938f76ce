//! Date/time normalization for Jira export data.
//!
//! User-entered and tool-exported timestamps arrive in roughly a dozen
//! representations. [`recognize`] classifies a value against a fixed,
//! ordered table of source formats ([`SourceFormat::PRECEDENCE`]), falls back
//! to spreadsheet serial dates, and [`normalize`] renders the result with a
//! caller-supplied [`FormatSpec`].
//!
//! Everything here is pure: the pattern table is built once and shared
//! read-only, and no function performs I/O.
//!
//! # Example
//!
//! ```
//! use jmig_temporal::{FormatSpec, normalize};
//!
//! let target = FormatSpec::new("%Y-%m-%d %H:%M").unwrap();
//! assert_eq!(normalize("06/08/2020 18:34", &target).unwrap(), "2020-06-08 18:34");
//! ```

pub mod error;
pub mod format;
pub mod normalize;
pub mod patterns;
pub mod serial;

pub use error::TemporalError;
pub use format::FormatSpec;
pub use normalize::{
    Recognized, TemporalCandidate, candidate, classify, normalize, pad_single_digits, recognize,
    recognize_pattern,
};
pub use patterns::SourceFormat;
pub use serial::{from_serial_date, parse_serial_date};
