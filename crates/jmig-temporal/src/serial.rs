//! Spreadsheet serial dates: fractional day counts since 1899-12-30.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses a serial date string. Only finite numbers are accepted.
pub fn parse_serial_date(value: &str) -> Option<NaiveDateTime> {
    let days = value.trim().parse::<f64>().ok()?;
    from_serial_date(days)
}

/// Converts a day count to a timestamp, rounding to the millisecond.
pub fn from_serial_date(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let millis = (days * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    epoch()?.checked_add_signed(delta)
}
