//! Multi-calendar agenda: build the day list, carve out busy time, apply the
//! daily window, and extract what is left free.
//!
//! An [`Agenda`] moves through its phases strictly forward:
//!
//! ```text
//! Initialized --populate--> Populated --restrict_to_window--> Windowed --extract_free--> Extracted
//!                  ^   |
//!                  +---+  (one call per calendar is fine)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::block::TimeBlock;
use crate::error::{MeetsError, Result};
use crate::request::ScheduleRequest;
use crate::splitter::{self, RawEvent};
use crate::timeline::{self, DayTimeline};
use crate::window::TimeWindow;

/// Lifecycle phase of an [`Agenda`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Initialized,
    Populated,
    Windowed,
    Extracted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialized => "initialized",
            Phase::Populated => "populated",
            Phase::Windowed => "windowed",
            Phase::Extracted => "extracted",
        };
        f.write_str(name)
    }
}

/// The per-request set of [`DayTimeline`]s, keyed and ordered by date.
#[derive(Debug, Clone)]
pub struct Agenda {
    tz: Tz,
    days: BTreeMap<NaiveDate, DayTimeline>,
    phase: Phase,
}

impl Agenda {
    /// One free day per date from `begin` to `end` inclusive.
    ///
    /// # Errors
    /// Returns `MeetsError::InvalidRange` if `end` precedes `begin`.
    pub fn new(begin: NaiveDate, end: NaiveDate, tz: Tz) -> Result<Self> {
        let days = timeline::build_day_list(begin, end, tz)?
            .into_iter()
            .map(|day| (day.date(), day))
            .collect::<BTreeMap<_, _>>();
        tracing::debug!(%begin, %end, tz = tz.name(), days = days.len(), "built day list");
        Ok(Self {
            tz,
            days,
            phase: Phase::Initialized,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayTimeline> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayTimeline> {
        self.days.values()
    }

    /// Insert the busy time of every non-transparent event of every calendar.
    ///
    /// Each event is split into per-day blocks and each block lands in the day
    /// matching its local start date. Blocks for days outside the agenda's range
    /// are ignored.
    ///
    /// Every event is split before any day is touched, so a failed call leaves
    /// the days and the phase as they were.
    ///
    /// # Errors
    /// `InvalidState` after the window has been applied; `InvalidInterval` for
    /// an event that ends at or before its start.
    pub fn populate(&mut self, events_by_calendar: &BTreeMap<String, Vec<RawEvent>>) -> Result<&mut Self> {
        self.require(&[Phase::Initialized, Phase::Populated], "populate")?;

        let mut staged: Vec<(&str, TimeBlock)> = Vec::new();
        for (calendar, events) in events_by_calendar {
            for event in events.iter().filter(|e| !e.transparent) {
                let blocks = splitter::split(event, self.tz)?;
                staged.extend(blocks.into_iter().map(|block| (calendar.as_str(), block)));
            }
        }

        let mut days = self.days.clone();
        let mut inserted = 0usize;
        for (calendar, block) in &staged {
            let date = block.start().date_naive();
            match days.get_mut(&date) {
                Some(day) => {
                    day.insert_busy(block)?;
                    inserted += 1;
                }
                None => tracing::trace!(%date, %calendar, "busy block outside requested range"),
            }
        }
        tracing::debug!(calendars = events_by_calendar.len(), blocks = staged.len(), inserted, "populated agenda");

        self.days = days;
        self.phase = Phase::Populated;
        Ok(self)
    }

    /// Clip every day to `window` applied to that day's date.
    ///
    /// # Errors
    /// `InvalidState` unless the agenda has just been populated.
    pub fn restrict_to_window(&mut self, window: TimeWindow) -> Result<&mut Self> {
        self.require(&[Phase::Populated], "restrict to window")?;

        for day in self.days.values_mut() {
            let (start, end) = window.on(day.date(), self.tz)?;
            day.restrict(start, end);
        }
        tracing::debug!(%window, "restricted agenda to window");

        self.phase = Phase::Windowed;
        Ok(self)
    }

    /// All free blocks across the agenda, ascending by start.
    ///
    /// # Errors
    /// `InvalidState` unless the window has been applied.
    pub fn extract_free(&mut self) -> Result<Vec<TimeBlock>> {
        self.require(&[Phase::Windowed, Phase::Extracted], "extract free time")?;

        let free: Vec<TimeBlock> = self
            .days
            .values()
            .flat_map(|day| day.free_blocks())
            .cloned()
            .collect();
        tracing::debug!(slots = free.len(), "extracted free time");

        self.phase = Phase::Extracted;
        Ok(free)
    }

    fn require(&self, allowed: &[Phase], operation: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(MeetsError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }
}

/// Run the whole pipeline for one request and return the free blocks.
pub fn find_free_time(
    request: &ScheduleRequest,
    events_by_calendar: &BTreeMap<String, Vec<RawEvent>>,
) -> Result<Vec<TimeBlock>> {
    let mut agenda = Agenda::new(request.begin_date, request.end_date, request.timezone)?;
    agenda
        .populate(events_by_calendar)?
        .restrict_to_window(request.window)?;
    agenda.extract_free()
}
