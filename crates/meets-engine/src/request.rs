//! The parameters of one scheduling request.

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;

use crate::error::{MeetsError, Result};
use crate::window::TimeWindow;

/// Date range, daily window and timezone chosen for a new meeting.
///
/// Both dates are inclusive calendar days in `timezone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    pub window: TimeWindow,
    pub timezone: Tz,
}

impl ScheduleRequest {
    /// # Errors
    /// Returns `MeetsError::InvalidRange` if `end_date` precedes `begin_date`.
    pub fn new(
        begin_date: NaiveDate,
        end_date: NaiveDate,
        window: TimeWindow,
        timezone: Tz,
    ) -> Result<Self> {
        if end_date < begin_date {
            return Err(MeetsError::InvalidRange {
                begin: begin_date.to_string(),
                end: end_date.to_string(),
            });
        }
        Ok(Self {
            begin_date,
            end_date,
            window,
            timezone,
        })
    }

    /// Tomorrow through one week from `today`, 9am to 5pm.
    ///
    /// # Errors
    /// Returns `MeetsError::DateOutOfRange` if the week after `today` runs past
    /// the last representable date.
    pub fn with_defaults(today: NaiveDate, timezone: Tz) -> Result<Self> {
        let after = |days: u64| {
            today
                .checked_add_days(Days::new(days))
                .ok_or_else(|| MeetsError::DateOutOfRange(format!("{} + {} days", today, days)))
        };
        Ok(Self {
            begin_date: after(1)?,
            end_date: after(7)?,
            window: TimeWindow::business_hours(),
            timezone,
        })
    }

    /// Number of calendar days covered.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.begin_date).num_days() + 1
    }
}
