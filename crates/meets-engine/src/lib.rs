//! # meets-engine
//!
//! Day-partitioned free/busy computation for scheduling a meeting across
//! several calendars.
//!
//! Every day of the requested range starts as one free block. Busy events from
//! each calendar are split at local midnight and carved out of the matching
//! days; overlapping busy time merges into a single span. Each day is then
//! clipped to a daily time window, and the remaining free blocks are the
//! candidate meeting slots.
//!
//! ## Modules
//!
//! - [`block`] — `TimeBlock`, the free/busy interval value type
//! - [`timeline`] — `DayTimeline` and day-list construction
//! - [`splitter`] — raw events → per-day busy blocks
//! - [`agenda`] — populate, window restriction, free-time extraction
//! - [`window`] — daily time-of-day windows
//! - [`dst`] — local wall-clock → instant resolution across DST transitions
//! - [`request`] — the parameters of one scheduling request
//! - [`source`] — normalized calendar/event records
//! - [`input`] — parsing of form-entered dates, times and timezones
//! - [`format`] — display formatting for dates and slots
//! - [`error`] — Error types

pub mod agenda;
pub mod block;
pub mod dst;
pub mod error;
pub mod format;
pub mod input;
pub mod request;
pub mod source;
pub mod splitter;
pub mod timeline;
pub mod window;

pub use agenda::{find_free_time, Agenda, Phase};
pub use block::{BlockKind, TimeBlock};
pub use error::MeetsError;
pub use request::ScheduleRequest;
pub use splitter::{split, EventTime, RawEvent};
pub use timeline::{build_day_list, DayTimeline};
pub use window::TimeWindow;
