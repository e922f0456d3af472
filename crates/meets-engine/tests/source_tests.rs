//! Tests for normalizing calendar records into raw events.

use chrono::NaiveDate;
use meets_engine::source::{
    events_by_calendar, parse_calendars_json, sort_calendars, CalendarRecord, EventRecord,
    EventTimeRecord,
};
use meets_engine::splitter::EventTime;
use meets_engine::MeetsError;

fn timed(value: &str) -> EventTimeRecord {
    EventTimeRecord {
        date_time: Some(value.to_string()),
        date: None,
    }
}

fn all_day(value: &str) -> EventTimeRecord {
    EventTimeRecord {
        date_time: None,
        date: Some(value.to_string()),
    }
}

fn calendar(summary: &str, primary: bool, selected: bool) -> CalendarRecord {
    CalendarRecord {
        id: format!("{}@example.com", summary.to_lowercase()),
        summary: summary.to_string(),
        primary,
        selected,
        ..Default::default()
    }
}

#[test]
fn timed_record_becomes_timed_event() {
    let record = EventRecord {
        summary: Some("standup".to_string()),
        start: timed("2026-03-16T10:00:00-07:00"),
        end: timed("2026-03-16T10:15:00-07:00"),
        transparency: None,
    };
    let event = record.to_raw_event().unwrap();

    assert!(matches!(event.start, EventTime::At(_)));
    assert_eq!(event.summary, "standup");
    assert!(!event.transparent);
}

#[test]
fn date_record_becomes_all_day_event() {
    let record = EventRecord {
        summary: None,
        start: all_day("2026-03-16"),
        end: all_day("2026-03-17"),
        transparency: None,
    };
    let event = record.to_raw_event().unwrap();

    assert_eq!(
        event.start,
        EventTime::AllDay(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap())
    );
    assert_eq!(event.summary, "no title");
}

#[test]
fn timed_value_wins_over_date() {
    let record = EventTimeRecord {
        date_time: Some("2026-03-16T10:00:00Z".to_string()),
        date: Some("2026-03-16".to_string()),
    };
    assert!(matches!(record.to_event_time().unwrap(), EventTime::At(_)));
}

#[test]
fn record_with_neither_time_nor_date_is_malformed() {
    let record = EventRecord {
        start: EventTimeRecord::default(),
        end: all_day("2026-03-17"),
        ..Default::default()
    };
    assert!(matches!(
        record.to_raw_event(),
        Err(MeetsError::MalformedEvent(_))
    ));
}

#[test]
fn unparseable_timestamp_is_malformed() {
    let record = EventRecord {
        start: timed("tomorrow morning"),
        end: timed("2026-03-16T10:15:00Z"),
        ..Default::default()
    };
    assert!(matches!(
        record.to_raw_event(),
        Err(MeetsError::MalformedEvent(_))
    ));
}

#[test]
fn transparency_flag_is_carried() {
    let record = EventRecord {
        start: all_day("2026-03-16"),
        end: all_day("2026-03-17"),
        transparency: Some("transparent".to_string()),
        ..Default::default()
    };
    assert!(record.to_raw_event().unwrap().transparent);

    let opaque = EventRecord {
        transparency: Some("opaque".to_string()),
        ..record
    };
    assert!(!opaque.to_raw_event().unwrap().transparent);
}

#[test]
fn calendars_sort_primary_then_selected_then_summary() {
    let mut calendars = vec![
        calendar("Zeta", false, false),
        calendar("Holidays", false, true),
        calendar("Alpha", false, false),
        calendar("Me", true, true),
        calendar("Books", false, true),
    ];
    sort_calendars(&mut calendars);

    let order: Vec<&str> = calendars.iter().map(|c| c.summary.as_str()).collect();
    assert_eq!(order, vec!["Me", "Books", "Holidays", "Alpha", "Zeta"]);
}

#[test]
fn only_selected_calendars_contribute() {
    let mut work = calendar("Work", true, true);
    work.items.push(EventRecord {
        start: timed("2026-03-16T10:00:00Z"),
        end: timed("2026-03-16T11:00:00Z"),
        ..Default::default()
    });
    let mut birthdays = calendar("Birthdays", false, false);
    birthdays.items.push(EventRecord {
        start: all_day("2026-03-16"),
        end: all_day("2026-03-17"),
        ..Default::default()
    });

    let by_calendar = events_by_calendar(&[work, birthdays]).unwrap();

    assert_eq!(by_calendar.len(), 1);
    assert_eq!(by_calendar["Work"].len(), 1);
}

#[test]
fn nothing_selected_means_everything_contributes() {
    let calendars = vec![calendar("Work", false, false), calendar("Home", false, false)];
    let by_calendar = events_by_calendar(&calendars).unwrap();
    assert_eq!(by_calendar.len(), 2);
}

#[test]
fn malformed_event_names_its_calendar() {
    let mut work = calendar("Work", true, true);
    work.items.push(EventRecord::default());

    let err = events_by_calendar(&[work]).unwrap_err();
    assert!(err.to_string().contains("calendar 'Work'"));
}

#[test]
fn parses_calendar_api_json() {
    let json = r#"[
        {
            "id": "me@example.com",
            "summary": "Me",
            "primary": true,
            "selected": true,
            "accessRole": "owner",
            "items": [
                {
                    "summary": "standup",
                    "start": {"dateTime": "2026-03-16T10:00:00-07:00"},
                    "end": {"dateTime": "2026-03-16T10:15:00-07:00"}
                },
                {
                    "start": {"date": "2026-03-17"},
                    "end": {"date": "2026-03-18"},
                    "transparency": "transparent"
                }
            ]
        }
    ]"#;

    let calendars = parse_calendars_json(json).unwrap();

    assert_eq!(calendars.len(), 1);
    assert!(calendars[0].is_owned());
    assert_eq!(calendars[0].items.len(), 2);
    assert!(calendars[0].items[1].is_transparent());
}

#[test]
fn invalid_json_is_reported() {
    assert!(matches!(
        parse_calendars_json("{not json"),
        Err(MeetsError::JsonParse(_))
    ));
}
