//! Split raw calendar events into single-day busy blocks.
//!
//! An event may start and end on different local days, or carry bare dates
//! instead of timestamps (all-day events). [`split`] turns any such event into
//! one busy [`TimeBlock`] per local day it touches, clipped at local midnight.

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;

use crate::block::TimeBlock;
use crate::dst;
use crate::error::Result;

/// Label used for events that carry no summary.
pub const UNTITLED: &str = "no title";

/// One end of an event: a precise instant, or a bare date for all-day events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    At(DateTime<FixedOffset>),
    /// All-day boundary. Resolves to local midnight at the start of the date, so
    /// an all-day event's end date is exclusive.
    AllDay(NaiveDate),
}

impl EventTime {
    /// The instant this boundary denotes in `tz`.
    pub fn resolve(&self, tz: Tz) -> Result<DateTime<Tz>> {
        match self {
            EventTime::At(dt) => Ok(dt.with_timezone(&tz)),
            EventTime::AllDay(date) => dst::day_start(tz, *date),
        }
    }
}

/// A calendar event already fetched from its provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub start: EventTime,
    pub end: EventTime,
    pub summary: String,
    /// Transparent events do not occupy time and never become busy blocks.
    pub transparent: bool,
}

impl RawEvent {
    pub fn new(start: EventTime, end: EventTime, summary: impl Into<String>) -> Self {
        Self {
            start,
            end,
            summary: summary.into(),
            transparent: false,
        }
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }
}

/// Split an event into busy blocks, one per local day it covers in `tz`.
///
/// The result is never empty. Blocks are ordered, contiguous, and their union is
/// exactly the event's interval; an event ending at local midnight produces no
/// block on the following day. The transparency flag is not consulted here.
///
/// # Errors
/// Returns `MeetsError::InvalidInterval` if the event ends at or before its start.
pub fn split(event: &RawEvent, tz: Tz) -> Result<Vec<TimeBlock>> {
    let start = event.start.resolve(tz)?;
    let end = event.end.resolve(tz)?;

    // Validates end > start before any day arithmetic.
    let whole = TimeBlock::busy(start, end, event.summary.as_str())?;

    let mut blocks = Vec::new();
    let mut cursor = whole.start();
    while cursor < end {
        let boundary = dst::day_end(tz, cursor.date_naive())?;
        let piece_end = boundary.min(end);
        blocks.push(TimeBlock::busy(cursor, piece_end, event.summary.as_str())?);
        cursor = piece_end;
    }

    tracing::trace!(
        summary = %event.summary,
        days = blocks.len(),
        "split event into day blocks"
    );
    Ok(blocks)
}
