//! Normalized calendar records as handed over by the calendar source.
//!
//! These shapes follow the common calendar-API layout: an event's `start` and
//! `end` each carry either a `dateTime` (timed event) or a `date` (all-day
//! event), and non-blocking events are flagged `transparency: "transparent"`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{MeetsError, Result};
use crate::splitter::{EventTime, RawEvent, UNTITLED};

/// One end of an event record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTimeRecord {
    /// RFC 3339 timestamp, e.g. `2026-03-16T10:00:00-07:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// `YYYY-MM-DD`, for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventTimeRecord {
    /// The timed value wins when both are present.
    pub fn to_event_time(&self) -> Result<EventTime> {
        if let Some(raw) = &self.date_time {
            return DateTime::parse_from_rfc3339(raw)
                .map(EventTime::At)
                .map_err(|e| MeetsError::MalformedEvent(format!("invalid dateTime '{raw}': {e}")));
        }
        if let Some(raw) = &self.date {
            return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(EventTime::AllDay)
                .map_err(|e| MeetsError::MalformedEvent(format!("invalid date '{raw}': {e}")));
        }
        Err(MeetsError::MalformedEvent(
            "event time has neither dateTime nor date".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub start: EventTimeRecord,
    pub end: EventTimeRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<String>,
}

impl EventRecord {
    /// Only `"transparent"` frees the time. `"opaque"` or an absent field
    /// still blocks it, so an event is not dropped merely for carrying the key.
    pub fn is_transparent(&self) -> bool {
        self.transparency.as_deref() == Some("transparent")
    }

    pub fn to_raw_event(&self) -> Result<RawEvent> {
        let summary = self
            .summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNTITLED);
        Ok(RawEvent {
            start: self.start.to_event_time()?,
            end: self.end.to_event_time()?,
            summary: summary.to_string(),
            transparent: self.is_transparent(),
        })
    }
}

/// A calendar with its already-fetched events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRecord {
    pub id: String,
    pub summary: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_role: Option<String>,
    #[serde(default)]
    pub items: Vec<EventRecord>,
}

impl CalendarRecord {
    pub fn is_owned(&self) -> bool {
        self.access_role.as_deref() == Some("owner")
    }
}

/// Parse a JSON array of calendar records.
pub fn parse_calendars_json(json: &str) -> Result<Vec<CalendarRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Order calendars for display: primary first, then selected, then by summary.
pub fn sort_calendars(calendars: &mut [CalendarRecord]) {
    calendars.sort_by(|a, b| {
        b.primary
            .cmp(&a.primary)
            .then(b.selected.cmp(&a.selected))
            .then_with(|| a.summary.cmp(&b.summary))
    });
}

/// Normalize the events of the selected calendars, keyed by calendar summary.
///
/// When no calendar is marked selected, every calendar contributes. Calendars
/// sharing a summary are combined under one key.
///
/// # Errors
/// Returns `MeetsError::MalformedEvent` for the first event whose times cannot
/// be interpreted.
pub fn events_by_calendar(calendars: &[CalendarRecord]) -> Result<BTreeMap<String, Vec<RawEvent>>> {
    let any_selected = calendars.iter().any(|c| c.selected);
    let mut by_calendar: BTreeMap<String, Vec<RawEvent>> = BTreeMap::new();

    for calendar in calendars.iter().filter(|c| c.selected || !any_selected) {
        let events = by_calendar.entry(calendar.summary.clone()).or_default();
        for item in &calendar.items {
            let event = item.to_raw_event().map_err(|e| match e {
                MeetsError::MalformedEvent(msg) => {
                    MeetsError::MalformedEvent(format!("calendar '{}': {msg}", calendar.summary))
                }
                other => other,
            })?;
            events.push(event);
        }
        tracing::debug!(calendar = %calendar.summary, events = calendar.items.len(), "normalized calendar");
    }

    Ok(by_calendar)
}
