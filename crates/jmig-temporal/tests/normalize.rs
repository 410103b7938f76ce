//! Tests for date/time recognition and normalization.
//!
//! Covers every source format slot, the slot precedence, the serial-date
//! fallback and output rendering.

use chrono::{FixedOffset, NaiveDate};
use jmig_temporal::{
    FormatSpec, SourceFormat, TemporalError, candidate, classify, normalize, recognize,
    recognize_pattern,
};
use proptest::prelude::*;

fn minutes() -> FormatSpec {
    FormatSpec::new("%Y-%m-%d %H:%M").expect("valid pattern")
}

fn seconds() -> FormatSpec {
    FormatSpec::new("%Y-%m-%d %H:%M:%S").expect("valid pattern")
}

// =========================================================================
// Source format slots
// =========================================================================

#[test]
fn test_iso_offset() {
    let recognized = recognize("2021-06-09T15:25:31.217-0400").expect("recognized");
    assert_eq!(recognized.format, SourceFormat::IsoOffset);
    assert_eq!(recognized.offset, FixedOffset::west_opt(4 * 3600));
    assert_eq!(
        recognized.datetime,
        NaiveDate::from_ymd_opt(2021, 6, 9)
            .unwrap()
            .and_hms_milli_opt(15, 25, 31, 217)
            .unwrap()
    );
}

#[test]
fn test_iso_colon_offset() {
    let recognized = recognize("2017-12-04T07:13:55.326-07:00").expect("recognized");
    assert_eq!(recognized.format, SourceFormat::IsoColonOffset);
    assert_eq!(recognized.offset, FixedOffset::west_opt(7 * 3600));

    let target = FormatSpec::new("%Y-%m-%d %H:%M %z").unwrap();
    assert_eq!(
        normalize("2017-12-04T07:13:55.326-07:00", &target).unwrap(),
        "2017-12-04 07:13 -0700"
    );
}

#[test]
fn test_iso_space_fraction() {
    assert_eq!(
        classify("2017-08-07 10:29:49.243"),
        Some(SourceFormat::IsoSpaceFraction)
    );
    assert_eq!(
        normalize("2017-08-07 10:29:49.243", &seconds()).unwrap(),
        "2017-08-07 10:29:49"
    );
}

#[test]
fn test_day_month_name_short_year() {
    assert_eq!(
        classify("01/Jan/06 07:04 AM"),
        Some(SourceFormat::DayMonthNameShortYear)
    );
    assert_eq!(normalize("01/Jan/06 07:04 AM", &minutes()).unwrap(), "2006-01-01 07:04");
    // Unpadded hour is padded before matching.
    assert_eq!(normalize("20/Jan/20 9:51 PM", &minutes()).unwrap(), "2020-01-20 21:51");
}

#[test]
fn test_numeric_twelve_hour_seconds() {
    let input = "12/17/2019  2:40:00 PM";
    assert_eq!(classify(input), Some(SourceFormat::NumericTwelveHourSeconds));
    assert_eq!(normalize(input, &seconds()).unwrap(), "2019-12-17 14:40:00");
}

#[test]
fn test_month_name_slash_date() {
    assert_eq!(
        classify("Dec/13/2017 07:03 AM"),
        Some(SourceFormat::MonthNameSlashDate)
    );
    assert_eq!(normalize("Dec/13/2017 07:03 AM", &minutes()).unwrap(), "2017-12-13 07:03");
}

#[test]
fn test_numeric_twenty_four_hour() {
    assert_eq!(
        classify("06/08/2020 18:34"),
        Some(SourceFormat::NumericTwentyFourHour)
    );
    assert_eq!(normalize("06/08/2020 18:34", &minutes()).unwrap(), "2020-06-08 18:34");
    assert_eq!(
        normalize("06/08/2020 18:34", &FormatSpec::round_trip()).unwrap(),
        "08/06/2020_18:34"
    );
}

#[test]
fn test_iso_date() {
    assert_eq!(normalize("2021-06-04", &minutes()).unwrap(), "2021-06-04 00:00");
    assert_eq!(classify("2021-06-04"), Some(SourceFormat::IsoDate));
}

#[test]
fn test_round_trip_format() {
    assert_eq!(classify("24/06/2005_11:16"), Some(SourceFormat::RoundTrip));
    assert_eq!(normalize("24/06/2005_11:16", &minutes()).unwrap(), "2005-06-24 11:16");
}

#[test]
fn test_numeric_short_year_twelve_hour() {
    assert_eq!(
        classify("12/14/21 01:33 PM"),
        Some(SourceFormat::NumericShortYearTwelveHour)
    );
    assert_eq!(normalize("12/14/21 01:33 PM", &minutes()).unwrap(), "2021-12-14 13:33");
}

#[test]
fn test_month_name_comma_date() {
    assert_eq!(
        classify("Dec 01, 2019 12:00 PM"),
        Some(SourceFormat::MonthNameCommaDate)
    );
    assert_eq!(normalize("Dec 1, 2019 12:00 PM", &minutes()).unwrap(), "2019-12-01 12:00");
}

#[test]
fn test_full_month_name_with_zone() {
    let recognized = recognize("June 14, 2022 2:13:12 PM EDT").expect("recognized");
    assert_eq!(recognized.format, SourceFormat::FullMonthNameWithZone);
    assert_eq!(recognized.offset, FixedOffset::west_opt(4 * 3600));
    assert_eq!(
        recognized.to_fixed().map(|dt| dt.to_rfc3339()),
        Some("2022-06-14T14:13:12-04:00".to_string())
    );
}

#[test]
fn test_full_month_name_with_unknown_zone() {
    let err = recognize("June 14, 2022 2:13:12 PM XYZ").unwrap_err();
    assert_eq!(
        err,
        TemporalError::Unrecognized {
            input: "June 14, 2022 2:13:12 PM XYZ".to_string(),
            matched: Some(SourceFormat::FullMonthNameWithZone),
        }
    );
}

#[test]
fn test_unpadded_numeric_date() {
    assert_eq!(classify("6/8/2020"), Some(SourceFormat::NumericDate));
    assert_eq!(normalize("6/8/2020", &minutes()).unwrap(), "2020-06-08 00:00");
}

// =========================================================================
// Precedence and failure modes
// =========================================================================

#[test]
fn test_precedence_prefers_stricter_slot() {
    // The date prefix alone would satisfy the bare-date slot.
    assert_eq!(
        classify("2021-06-09T15:25:31.217-0400"),
        Some(SourceFormat::IsoOffset)
    );
    let earlier = SourceFormat::PRECEDENCE
        .iter()
        .position(|f| *f == SourceFormat::IsoOffset);
    let later = SourceFormat::PRECEDENCE
        .iter()
        .position(|f| *f == SourceFormat::IsoDate);
    assert!(earlier < later);
}

#[test]
fn test_first_match_wins_even_when_invalid() {
    let err = recognize("02/30/2020 18:34").unwrap_err();
    assert!(matches!(
        err,
        TemporalError::Unrecognized {
            matched: Some(SourceFormat::NumericTwentyFourHour),
            ..
        }
    ));
}

#[test]
fn test_unrecognized() {
    let err = normalize("not-a-date", &minutes()).unwrap_err();
    assert_eq!(
        err,
        TemporalError::Unrecognized {
            input: "not-a-date".to_string(),
            matched: None,
        }
    );
    assert_eq!(classify("not-a-date"), None);
}

#[test]
fn test_empty_value() {
    assert_eq!(recognize("   "), Err(TemporalError::Empty));
}

// =========================================================================
// Serial-date fallback
// =========================================================================

#[test]
fn test_serial_date_fallback() {
    let recognized = recognize("44287.3166666667").expect("serial date");
    assert_eq!(recognized.format, SourceFormat::SerialDate);
    assert_eq!(normalize("44287.3166666667", &minutes()).unwrap(), "2021-04-01 07:36");
    assert_eq!(normalize("44287.3166666667", &seconds()).unwrap(), "2021-04-01 07:36:00");
}

#[test]
fn test_pattern_only_recognition_ignores_serial_dates() {
    assert!(recognize_pattern("44287.3166666667").is_err());
    assert!(recognize_pattern("42").is_err());
    assert!(recognize_pattern("2021-05-01").is_ok());
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn test_render_offset_directive_without_offset() {
    let target = FormatSpec::new("%Y-%m-%d %z").unwrap();
    let err = normalize("2021-06-04", &target).unwrap_err();
    assert_eq!(
        err,
        TemporalError::Render {
            pattern: "%Y-%m-%d %z".to_string(),
            format: SourceFormat::IsoDate,
        }
    );
}

#[test]
fn test_candidate_records_match() {
    let found = candidate("Dec/13/2017 07:03 AM", &FormatSpec::round_trip());
    assert_eq!(found.format, Some(SourceFormat::MonthNameSlashDate));
    assert_eq!(found.canonical.as_deref(), Some("13/12/2017_07:03"));

    let missing = candidate("soon", &FormatSpec::round_trip());
    assert_eq!(missing.format, None);
    assert_eq!(missing.canonical, None);
    assert_eq!(missing.source, "soon");
}

#[test]
fn test_format_spec_deserializes_with_validation() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        format: FormatSpec,
    }
    let ok: Result<Wrapper, _> = serde_json::from_str(r#"{"format": "%d/%m/%Y"}"#);
    assert!(ok.is_ok());
    let bad: Result<Wrapper, _> = serde_json::from_str(r#"{"format": "%Q"}"#);
    assert!(bad.is_err());
}

proptest! {
    #[test]
    fn round_trip_normalization_is_idempotent(
        year in 1970i32..2070,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let target = FormatSpec::round_trip();
        let input = format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:00.000");
        let once = normalize(&input, &target).unwrap();
        let twice = normalize(&once, &target).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(classify(&once), Some(SourceFormat::RoundTrip));
    }

    #[test]
    fn normalization_is_deterministic(input in "\\PC{0,24}") {
        let target = FormatSpec::round_trip();
        prop_assert_eq!(normalize(&input, &target), normalize(&input, &target));
    }
}
