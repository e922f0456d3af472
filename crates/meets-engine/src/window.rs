//! Daily time-of-day windows.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::dst;
use crate::error::{MeetsError, Result};

/// A recurring half-open local time-of-day range `[begin, end)`, e.g. 9am–5pm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    begin: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Both edges are wall-clock times on the same day, so the latest a window
    /// can end is 23:59; midnight as an end reads as `00:00` and is rejected.
    ///
    /// # Errors
    /// Returns `MeetsError::InvalidWindow` if `end <= begin`.
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Result<Self> {
        if end <= begin {
            return Err(MeetsError::InvalidWindow {
                begin: begin.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { begin, end })
    }

    /// 09:00–17:00.
    pub fn business_hours() -> Self {
        Self {
            begin: NaiveTime::MIN + Duration::hours(9),
            end: NaiveTime::MIN + Duration::hours(17),
        }
    }

    pub fn begin(&self) -> NaiveTime {
        self.begin
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// The window's instants on `date` in `tz`.
    ///
    /// Edges falling into a DST gap move to the end of the gap, so the window can
    /// come out shorter (or empty) on transition days.
    pub fn on(&self, date: NaiveDate, tz: Tz) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let start = dst::resolve_local(tz, date.and_time(self.begin))?;
        let end = dst::resolve_local(tz, date.and_time(self.end))?;
        Ok((start, end.max(start)))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin.format("%H:%M"), self.end.format("%H:%M"))
    }
}
