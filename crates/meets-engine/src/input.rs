//! Interpret the human-entered values of a scheduling form.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::error::{MeetsError, Result};

/// Parse a time of day such as `9am`, `1:30pm`, `1:30 pm` or `13:30`.
///
/// # Errors
/// Returns `MeetsError::InvalidTimeOfDay` for anything else.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime> {
    let invalid = || MeetsError::InvalidTimeOfDay(text.to_string());
    let lowered = text.trim().to_ascii_lowercase();

    let (clock, meridiem) = match lowered
        .strip_suffix("am")
        .map(|rest| (rest, "am"))
        .or_else(|| lowered.strip_suffix("pm").map(|rest| (rest, "pm")))
    {
        Some((rest, m)) => (rest.trim_end(), Some(m)),
        None => (lowered.as_str(), None),
    };
    if clock.is_empty() {
        return Err(invalid());
    }

    let clock = if clock.contains(':') {
        clock.to_string()
    } else if meridiem.is_some() {
        format!("{clock}:00")
    } else {
        // A bare hour is only accepted with am/pm.
        return Err(invalid());
    };

    let parsed = match meridiem {
        Some(m) => NaiveTime::parse_from_str(&format!("{clock} {m}"), "%I:%M %p"),
        None => NaiveTime::parse_from_str(&clock, "%H:%M"),
    };
    parsed.map_err(|_| invalid())
}

/// Parse a `MM/DD/YYYY` date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%m/%d/%Y")
        .map_err(|_| MeetsError::InvalidDate(text.to_string()))
}

/// Parse a date-range picker value: `MM/DD/YYYY - MM/DD/YYYY`, both inclusive.
///
/// # Errors
/// `InvalidDate` if the text does not have three whitespace-separated parts or
/// either date is malformed; `InvalidRange` if the end precedes the begin.
pub fn parse_date_range(text: &str) -> Result<(NaiveDate, NaiveDate)> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [begin, _, end] = parts.as_slice() else {
        return Err(MeetsError::InvalidDate(text.to_string()));
    };
    let begin = parse_date(begin)?;
    let end = parse_date(end)?;
    if end < begin {
        return Err(MeetsError::InvalidRange {
            begin: begin.to_string(),
            end: end.to_string(),
        });
    }
    Ok((begin, end))
}

/// Parse an IANA timezone name such as `America/Los_Angeles`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| MeetsError::InvalidTimezone(name.to_string()))
}
