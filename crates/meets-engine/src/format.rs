//! Display formatting for dates and free slots.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::block::TimeBlock;

/// `Mon 03/16/26`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %m/%d/%y").to_string()
}

/// `13:30`
pub fn format_time(dt: DateTime<Tz>) -> String {
    dt.format("%H:%M").to_string()
}

/// `1:30 pm`
pub fn format_slot_time(dt: DateTime<Tz>) -> String {
    dt.format("%-I:%M %P").to_string()
}

/// `9:00 am - 10:00 am`
pub fn format_slot(block: &TimeBlock) -> String {
    format!(
        "{} - {}",
        format_slot_time(block.start()),
        format_slot_time(block.end())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Los_Angeles;

    #[test]
    fn slot_uses_twelve_hour_clock() {
        let start = Los_Angeles.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
        let end = Los_Angeles.with_ymd_and_hms(2026, 3, 16, 13, 30, 0).unwrap();
        let block = TimeBlock::free(start, end).unwrap();
        assert_eq!(format_slot(&block), "9:00 am - 1:30 pm");
        assert_eq!(format_time(end), "13:30");
        assert_eq!(format_date(start.date_naive()), "Mon 03/16/26");
    }
}
