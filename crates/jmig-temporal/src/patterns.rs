//! The fixed, ordered table of recognized source formats.
//!
//! Slots are tried in [`SourceFormat::PRECEDENCE`] order against the
//! prepared input (trimmed, single digits padded, whitespace collapsed) and
//! the first slot whose pattern matches decides how the value is parsed.
//! The order is part of the contract: a later, looser slot never preempts an
//! earlier, stricter one.

use std::fmt;
use std::sync::LazyLock;

use chrono::FixedOffset;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `2021-06-09T15:25:31.217-0400`
    IsoOffset,
    /// `2017-12-04T07:13:55.326-07:00`
    IsoColonOffset,
    /// `2017-08-07 10:29:49.243`
    IsoSpaceFraction,
    /// `01/Jan/06 07:04 AM`
    DayMonthNameShortYear,
    /// `12/17/2019  2:40:00 PM`
    NumericTwelveHourSeconds,
    /// `Dec/13/2017 07:03 AM`
    MonthNameSlashDate,
    /// `06/08/2020 18:34`
    NumericTwentyFourHour,
    /// `2021-06-04`
    IsoDate,
    /// `24/06/2005_11:16`, the format this tool writes back.
    RoundTrip,
    /// `12/14/21 01:33 PM`
    NumericShortYearTwelveHour,
    /// `Dec 01, 2019 12:00 PM`
    MonthNameCommaDate,
    /// `June 14, 2022 2:13:12 PM EDT`
    FullMonthNameWithZone,
    /// `6/8/2020`
    NumericDate,
    /// Spreadsheet day count since 1899-12-30, e.g. `44287.3166666667`.
    SerialDate,
}

impl SourceFormat {
    /// Pattern slots in the order they are tried. The serial-date fallback
    /// is not a pattern slot and runs only when none of these match.
    pub const PRECEDENCE: [SourceFormat; 13] = [
        SourceFormat::IsoOffset,
        SourceFormat::IsoColonOffset,
        SourceFormat::IsoSpaceFraction,
        SourceFormat::DayMonthNameShortYear,
        SourceFormat::NumericTwelveHourSeconds,
        SourceFormat::MonthNameSlashDate,
        SourceFormat::NumericTwentyFourHour,
        SourceFormat::IsoDate,
        SourceFormat::RoundTrip,
        SourceFormat::NumericShortYearTwelveHour,
        SourceFormat::MonthNameCommaDate,
        SourceFormat::FullMonthNameWithZone,
        SourceFormat::NumericDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::IsoOffset => "iso-offset",
            Self::IsoColonOffset => "iso-colon-offset",
            Self::IsoSpaceFraction => "iso-space-fraction",
            Self::DayMonthNameShortYear => "day-month-name-short-year",
            Self::NumericTwelveHourSeconds => "numeric-twelve-hour-seconds",
            Self::MonthNameSlashDate => "month-name-slash-date",
            Self::NumericTwentyFourHour => "numeric-twenty-four-hour",
            Self::IsoDate => "iso-date",
            Self::RoundTrip => "round-trip",
            Self::NumericShortYearTwelveHour => "numeric-short-year-twelve-hour",
            Self::MonthNameCommaDate => "month-name-comma-date",
            Self::FullMonthNameWithZone => "full-month-name-with-zone",
            Self::NumericDate => "numeric-date",
            Self::SerialDate => "serial-date",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the prepared string is handed to chrono once a slot matches.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ParseKind {
    /// Date, time and numeric UTC offset.
    Offset,
    /// Date and time without offset.
    Naive,
    /// Date only; the time is midnight.
    Date,
    /// Date and time followed by a zone abbreviation.
    Zoned,
}

pub(crate) struct PatternSlot {
    pub(crate) format: SourceFormat,
    pub(crate) regex: Regex,
    /// chrono parse directives for the prepared (and slot-adjusted) string.
    pub(crate) directives: &'static str,
    pub(crate) kind: ParseKind,
}

const SLOT_SOURCES: [(SourceFormat, &str, &str, ParseKind); 13] = [
    (
        SourceFormat::IsoOffset,
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d:[0-5]\d\.\d{3}[+-]\d{4}$",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        ParseKind::Offset,
    ),
    (
        SourceFormat::IsoColonOffset,
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d:[0-5]\d\.\d{3}[+-]([01]\d|2[0-3]):[0-5]\d$",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        ParseKind::Offset,
    ),
    (
        SourceFormat::IsoSpaceFraction,
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01]) ([01]\d|2[0-3]):[0-5]\d:[0-5]\d\.\d+$",
        "%Y-%m-%d %H:%M:%S%.f",
        ParseKind::Naive,
    ),
    (
        SourceFormat::DayMonthNameShortYear,
        r"^(0[1-9]|[12]\d|3[01])/[A-Za-z]{3}/\d{2} (0[1-9]|1[0-2]):[0-5]\d [AaPp][Mm]$",
        "%d/%b/%y %I:%M %p",
        ParseKind::Naive,
    ),
    (
        SourceFormat::NumericTwelveHourSeconds,
        r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/\d{4} (\d|0\d|1[0-2]):[0-5]\d:[0-5]\d [AaPp][Mm]$",
        "%m/%d/%Y %I:%M:%S %p",
        ParseKind::Naive,
    ),
    (
        SourceFormat::MonthNameSlashDate,
        r"^[A-Za-z]{3}/(0[1-9]|[12]\d|3[01])/\d{4} (0[1-9]|1[0-2]):[0-5]\d [AaPp][Mm]$",
        "%b/%d/%Y %I:%M %p",
        ParseKind::Naive,
    ),
    (
        SourceFormat::NumericTwentyFourHour,
        r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/\d{4} ([01]\d|2[0-3]):[0-5]\d$",
        "%m/%d/%Y %H:%M",
        ParseKind::Naive,
    ),
    (
        SourceFormat::IsoDate,
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$",
        "%Y-%m-%d",
        ParseKind::Date,
    ),
    (
        SourceFormat::RoundTrip,
        r"^(0[1-9]|[12]\d|3[01])/(0[1-9]|1[0-2])/\d{4}_([01]\d|2[0-3]):[0-5]\d$",
        "%d/%m/%Y_%H:%M",
        ParseKind::Naive,
    ),
    (
        SourceFormat::NumericShortYearTwelveHour,
        r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/\d{2} (0[1-9]|1[0-2]):[0-5]\d [AaPp][Mm]$",
        "%m/%d/%y %I:%M %p",
        ParseKind::Naive,
    ),
    (
        SourceFormat::MonthNameCommaDate,
        r"^[A-Za-z]{3} (0[1-9]|[12]\d|3[01]), \d{4} (0[1-9]|1[0-2]):[0-5]\d [AaPp][Mm]$",
        "%b %d, %Y %I:%M %p",
        ParseKind::Naive,
    ),
    (
        SourceFormat::FullMonthNameWithZone,
        r"^[A-Za-z]+ (0[1-9]|[12]\d|3[01]), \d{4} (\d|0\d|1[0-2]):[0-5]\d:[0-5]\d [AaPp][Mm] [A-Z]{1,5}$",
        "%B %d, %Y %I:%M:%S %p",
        ParseKind::Zoned,
    ),
    (
        SourceFormat::NumericDate,
        r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/\d{4}$",
        "%m/%d/%Y",
        ParseKind::Date,
    ),
];

pub(crate) static PATTERN_SLOTS: LazyLock<Vec<PatternSlot>> = LazyLock::new(|| {
    SLOT_SOURCES
        .iter()
        .map(|&(format, pattern, directives, kind)| PatternSlot {
            format,
            regex: Regex::new(pattern).expect("Invalid date pattern regex"),
            directives,
            kind,
        })
        .collect()
});

/// Zone abbreviations accepted after a full-month-name timestamp.
const ZONE_OFFSETS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("NST", -(3 * 3600 + 1800)),
    ("NDT", -(2 * 3600 + 1800)),
    ("AST", -4 * 3600),
    ("ADT", -3 * 3600),
    ("EST", -5 * 3600),
    ("EDT", -4 * 3600),
    ("CST", -6 * 3600),
    ("CDT", -5 * 3600),
    ("MST", -7 * 3600),
    ("MDT", -6 * 3600),
    ("PST", -8 * 3600),
    ("PDT", -7 * 3600),
    ("AKST", -9 * 3600),
    ("AKDT", -8 * 3600),
    ("HST", -10 * 3600),
];

pub(crate) fn zone_offset(abbreviation: &str) -> Option<FixedOffset> {
    ZONE_OFFSETS
        .iter()
        .find(|(name, _)| *name == abbreviation)
        .and_then(|&(_, seconds)| FixedOffset::east_opt(seconds))
}
