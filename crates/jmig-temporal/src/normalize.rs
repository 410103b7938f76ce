//! Classify-then-format pipeline.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::TemporalError;
use crate::format::FormatSpec;
use crate::patterns::{PATTERN_SLOTS, ParseKind, PatternSlot, SourceFormat, zone_offset};
use crate::serial::parse_serial_date;

/// A parsed value and the slot that recognized it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub format: SourceFormat,
    /// Wall-clock time as written in the source.
    pub datetime: NaiveDateTime,
    /// UTC offset, when the source carried one.
    pub offset: Option<FixedOffset>,
}

impl Recognized {
    /// The instant as an offset-aware value, when the source had an offset.
    pub fn to_fixed(&self) -> Option<DateTime<FixedOffset>> {
        self.offset
            .and_then(|offset| self.datetime.and_local_timezone(offset).single())
    }
}

/// Outcome of normalizing one input string; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalCandidate {
    pub source: String,
    pub format: Option<SourceFormat>,
    pub canonical: Option<String>,
}

/// Normalizes `input` to the canonical text described by `target`.
///
/// # Errors
///
/// [`TemporalError::Unrecognized`] when neither a pattern slot nor the
/// serial-date fallback accepts the value. Callers treat this as a hard stop
/// for the record.
pub fn normalize(input: &str, target: &FormatSpec) -> Result<String, TemporalError> {
    let recognized = recognize(input)?;
    target.render(&recognized)
}

/// Normalizes `input`, keeping the source string and the matched slot.
pub fn candidate(input: &str, target: &FormatSpec) -> TemporalCandidate {
    match recognize(input) {
        Ok(recognized) => TemporalCandidate {
            source: input.to_string(),
            format: Some(recognized.format),
            canonical: target.render(&recognized).ok(),
        },
        Err(TemporalError::Unrecognized { matched, .. }) => TemporalCandidate {
            source: input.to_string(),
            format: matched,
            canonical: None,
        },
        Err(_) => TemporalCandidate {
            source: input.to_string(),
            format: None,
            canonical: None,
        },
    }
}

/// Parses `input` with the pattern slots, falling back to a serial date when
/// no slot matches.
pub fn recognize(input: &str) -> Result<Recognized, TemporalError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TemporalError::Empty);
    }
    match recognize_slots(trimmed) {
        SlotMatch::Parsed(recognized) => Ok(recognized),
        SlotMatch::Rejected(format) => Err(TemporalError::Unrecognized {
            input: input.to_string(),
            matched: Some(format),
        }),
        SlotMatch::None => parse_serial_date(trimmed)
            .map(|datetime| Recognized {
                format: SourceFormat::SerialDate,
                datetime,
                offset: None,
            })
            .ok_or_else(|| TemporalError::Unrecognized {
                input: input.to_string(),
                matched: None,
            }),
    }
}

/// Parses `input` with the pattern slots only.
///
/// Used where a bare number must not count as a date, such as validating a
/// sub-value of a compound field.
pub fn recognize_pattern(input: &str) -> Result<Recognized, TemporalError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TemporalError::Empty);
    }
    match recognize_slots(trimmed) {
        SlotMatch::Parsed(recognized) => Ok(recognized),
        SlotMatch::Rejected(format) => Err(TemporalError::Unrecognized {
            input: input.to_string(),
            matched: Some(format),
        }),
        SlotMatch::None => Err(TemporalError::Unrecognized {
            input: input.to_string(),
            matched: None,
        }),
    }
}

/// The slot that recognizes `input`, or `SerialDate` when only the fallback
/// does. Classification does not check calendar validity.
pub fn classify(input: &str) -> Option<SourceFormat> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let prepared = prepare(trimmed);
    PATTERN_SLOTS
        .iter()
        .find(|slot| slot.regex.is_match(&prepared))
        .map(|slot| slot.format)
        .or_else(|| parse_serial_date(trimmed).map(|_| SourceFormat::SerialDate))
}

enum SlotMatch {
    Parsed(Recognized),
    /// The first matching slot could not produce a calendar value.
    Rejected(SourceFormat),
    None,
}

fn recognize_slots(trimmed: &str) -> SlotMatch {
    let prepared = prepare(trimmed);
    let Some(slot) = PATTERN_SLOTS
        .iter()
        .find(|slot| slot.regex.is_match(&prepared))
    else {
        return SlotMatch::None;
    };
    match parse_slot(slot, &prepared) {
        Some(recognized) => SlotMatch::Parsed(recognized),
        None => SlotMatch::Rejected(slot.format),
    }
}

fn parse_slot(slot: &PatternSlot, prepared: &str) -> Option<Recognized> {
    let adjusted: Cow<'_, str> = match slot.format {
        SourceFormat::IsoColonOffset => Cow::Owned(strip_offset_colon(prepared)),
        SourceFormat::NumericTwelveHourSeconds | SourceFormat::FullMonthNameWithZone => {
            pad_hour(prepared)
        }
        _ => Cow::Borrowed(prepared),
    };
    let (datetime, offset) = match slot.kind {
        ParseKind::Offset => {
            let parsed = DateTime::parse_from_str(&adjusted, slot.directives).ok()?;
            (parsed.naive_local(), Some(*parsed.offset()))
        }
        ParseKind::Naive => (
            NaiveDateTime::parse_from_str(&adjusted, slot.directives).ok()?,
            None,
        ),
        ParseKind::Date => (
            NaiveDate::parse_from_str(&adjusted, slot.directives)
                .ok()?
                .and_hms_opt(0, 0, 0)?,
            None,
        ),
        ParseKind::Zoned => {
            let (stamp, zone) = adjusted.rsplit_once(' ')?;
            let offset = zone_offset(zone)?;
            (
                NaiveDateTime::parse_from_str(stamp, slot.directives).ok()?,
                Some(offset),
            )
        }
    };
    Some(Recognized {
        format: slot.format,
        datetime,
        offset,
    })
}

fn prepare(trimmed: &str) -> String {
    collapse_whitespace(&pad_single_digits(trimmed))
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Left-pads every digit that stands alone as a word with `0`
/// (`6/8/2020` becomes `06/08/2020`).
///
/// A digit directly after `.` is a fractional part and is left alone.
pub fn pad_single_digits(value: &str) -> Cow<'_, str> {
    let chars: Vec<char> = value.chars().collect();
    let is_word = |ch: char| ch.is_alphanumeric() || ch == '_';
    let mut out = String::with_capacity(value.len() + 4);
    let mut changed = false;
    for (index, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_digit() {
            let before = index.checked_sub(1).map(|prev| chars[prev]);
            let after = chars.get(index + 1).copied();
            let alone = before.is_none_or(|prev| !is_word(prev) && prev != '.')
                && after.is_none_or(|next| !is_word(next));
            if alone {
                out.push('0');
                changed = true;
            }
        }
        out.push(ch);
    }
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(value)
    }
}

/// Zero-pads a one-digit hour found between the last space before the first
/// colon and that colon.
fn pad_hour(value: &str) -> Cow<'_, str> {
    let Some(colon) = value.find(':') else {
        return Cow::Borrowed(value);
    };
    let Some(space) = value[..colon].rfind(' ') else {
        return Cow::Borrowed(value);
    };
    let hour = &value[space + 1..colon];
    match hour.parse::<u32>() {
        Ok(number) if hour.len() == 1 && number <= 12 => Cow::Owned(format!(
            "{}0{}{}",
            &value[..=space],
            hour,
            &value[colon..]
        )),
        _ => Cow::Borrowed(value),
    }
}

/// `-07:00` becomes `-0700`.
fn strip_offset_colon(value: &str) -> String {
    match value.rfind(['+', '-']) {
        Some(sign) => {
            let (head, offset) = value.split_at(sign);
            format!("{head}{}", offset.replacen(':', "", 1))
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_lone_digits_only() {
        assert_eq!(pad_single_digits("6/8/2020"), "06/08/2020");
        assert_eq!(pad_single_digits("12/17/2019 2:40:00 PM"), "12/17/2019 02:40:00 PM");
        assert_eq!(pad_single_digits("2017-08-07 10:29:49.2"), "2017-08-07 10:29:49.2");
        assert!(matches!(pad_single_digits("2021-06-04"), Cow::Borrowed(_)));
    }

    #[test]
    fn pad_hour_uses_space_before_first_colon() {
        assert_eq!(
            pad_hour("June 14, 2022 2:13:12 PM EDT"),
            "June 14, 2022 02:13:12 PM EDT"
        );
        assert_eq!(pad_hour("12/17/2019 11:40:00 PM"), "12/17/2019 11:40:00 PM");
        assert_eq!(pad_hour("no colon"), "no colon");
    }

    #[test]
    fn strips_offset_colon() {
        assert_eq!(
            strip_offset_colon("2017-12-04T07:13:55.326-07:00"),
            "2017-12-04T07:13:55.326-0700"
        );
    }
}
