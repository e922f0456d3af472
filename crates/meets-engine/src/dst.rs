//! Mapping local wall-clock times to instants across DST transitions.
//!
//! Day boundaries and window edges are expressed as local times, but not every
//! local time exists exactly once. Ambiguous times (fall back) resolve to the
//! earliest instant; nonexistent times (spring forward) resolve to the first
//! instant after the gap.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{MeetsError, Result};

/// Longest gap we are willing to scan across. Whole-day jumps (e.g. Pacific/Apia
/// skipping 2011-12-30) are 24 hours.
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// Resolve a local wall-clock time in `tz` to a concrete instant.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            // Transitions land on minute boundaries; walk forward until the
            // wall clock exists again.
            let mut probe = local;
            for _ in 0..MAX_GAP_MINUTES {
                probe += Duration::minutes(1);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) => return Ok(dt),
                    LocalResult::Ambiguous(earliest, _) => return Ok(earliest),
                    LocalResult::None => {}
                }
            }
            Err(MeetsError::UnresolvableLocalTime(
                local.to_string(),
                tz.name().to_string(),
            ))
        }
    }
}

/// Local midnight at the start of `date`.
pub fn day_start(tz: Tz, date: NaiveDate) -> Result<DateTime<Tz>> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Local midnight at the end of `date` (the start of the following day).
pub fn day_end(tz: Tz, date: NaiveDate) -> Result<DateTime<Tz>> {
    match date.succ_opt() {
        Some(next) => day_start(tz, next),
        None => Err(MeetsError::UnresolvableLocalTime(
            format!("{date} + 1 day"),
            tz.name().to_string(),
        )),
    }
}
