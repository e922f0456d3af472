//! Tests for interpreting form-entered dates, times and timezones.

use chrono::{NaiveDate, NaiveTime};
use meets_engine::input::{parse_date, parse_date_range, parse_time_of_day, parse_timezone};
use meets_engine::MeetsError;

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

#[test]
fn accepts_all_supported_time_formats() {
    assert_eq!(parse_time_of_day("9am").unwrap(), time(9, 0));
    assert_eq!(parse_time_of_day("5PM").unwrap(), time(17, 0));
    assert_eq!(parse_time_of_day("1:30pm").unwrap(), time(13, 30));
    assert_eq!(parse_time_of_day("1:30 pm").unwrap(), time(13, 30));
    assert_eq!(parse_time_of_day("13:30").unwrap(), time(13, 30));
    assert_eq!(parse_time_of_day(" 8:05 ").unwrap(), time(8, 5));
}

#[test]
fn twelve_am_and_pm() {
    assert_eq!(parse_time_of_day("12am").unwrap(), time(0, 0));
    assert_eq!(parse_time_of_day("12pm").unwrap(), time(12, 0));
}

#[test]
fn rejects_unrecognized_times() {
    for text in ["", "noon", "25:00", "13:30pm", "9", "am", "9:7x"] {
        assert!(
            matches!(parse_time_of_day(text), Err(MeetsError::InvalidTimeOfDay(_))),
            "expected '{}' to be rejected",
            text
        );
    }
}

#[test]
fn parses_us_style_dates() {
    assert_eq!(
        parse_date("03/16/2026").unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    );
    assert!(matches!(parse_date("2026-03-16"), Err(MeetsError::InvalidDate(_))));
    assert!(matches!(parse_date("02/30/2026"), Err(MeetsError::InvalidDate(_))));
}

#[test]
fn parses_date_range_picker_value() {
    let (begin, end) = parse_date_range("03/16/2026 - 03/20/2026").unwrap();
    assert_eq!(begin, NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
}

#[test]
fn date_range_must_have_three_parts_and_be_ordered() {
    assert!(matches!(
        parse_date_range("03/16/2026"),
        Err(MeetsError::InvalidDate(_))
    ));
    assert!(matches!(
        parse_date_range("03/20/2026 - 03/16/2026"),
        Err(MeetsError::InvalidRange { .. })
    ));
}

#[test]
fn timezone_names() {
    assert_eq!(
        parse_timezone("America/Los_Angeles").unwrap(),
        chrono_tz::America::Los_Angeles
    );
    assert!(matches!(
        parse_timezone("Mars/Olympus_Mons"),
        Err(MeetsError::InvalidTimezone(_))
    ));
}
