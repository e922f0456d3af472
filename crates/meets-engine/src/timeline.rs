//! One calendar day as an ordered partition of free and busy blocks.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::block::{BlockKind, TimeBlock};
use crate::dst;
use crate::error::{MeetsError, Result};

/// A calendar day in a local timezone, partitioned into [`TimeBlock`]s.
///
/// The blocks are ordered by start, contiguous, non-overlapping, and together
/// cover `[span_start, span_end)` exactly. The span is the full local day until
/// the agenda restricts the day to a daily time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTimeline {
    date: NaiveDate,
    span_start: DateTime<Tz>,
    span_end: DateTime<Tz>,
    blocks: Vec<TimeBlock>,
}

impl DayTimeline {
    /// A day covered by a single free block from local midnight to local midnight.
    ///
    /// Returns `Ok(None)` if `date` does not exist in `tz` (the zone skipped the
    /// whole day).
    pub fn new(date: NaiveDate, tz: Tz) -> Result<Option<Self>> {
        let span_start = dst::day_start(tz, date)?;
        let span_end = dst::day_end(tz, date)?;
        if span_start >= span_end || span_start.date_naive() != date {
            return Ok(None);
        }
        Ok(Some(Self {
            date,
            span_start,
            span_end,
            blocks: vec![TimeBlock::free(span_start, span_end)?],
        }))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn span_start(&self) -> DateTime<Tz> {
        self.span_start
    }

    pub fn span_end(&self) -> DateTime<Tz> {
        self.span_end
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn free_blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.blocks.iter().filter(|b| b.is_free())
    }

    pub fn busy_blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.blocks.iter().filter(|b| b.is_busy())
    }

    /// Total minutes of blocks of the given kind.
    pub fn total_minutes(&self, kind: BlockKind) -> i64 {
        self.blocks
            .iter()
            .filter(|b| b.kind() == kind)
            .map(TimeBlock::duration_minutes)
            .sum()
    }

    /// Whether the blocks partition the span with no gap and no overlap.
    pub fn is_partitioned(&self) -> bool {
        let Some(first) = self.blocks.first() else {
            return self.span_start >= self.span_end;
        };
        if first.start() != self.span_start {
            return false;
        }
        let contiguous = self
            .blocks
            .windows(2)
            .all(|pair| pair[0].end() == pair[1].start());
        let last_end = self.blocks.last().map(TimeBlock::end);
        contiguous && last_end == Some(self.span_end)
    }

    /// Mark `[block.start, block.end)` busy, clipped to this day's span.
    ///
    /// Busy blocks overlapping the interval are absorbed into one continuous busy
    /// block whose label lists every distinct contributing label. Free blocks it
    /// overlaps shrink to their residual parts before and after. Busy blocks
    /// that only touch the interval are left alone, so re-inserting an interval
    /// that is already busy changes nothing.
    pub fn insert_busy(&mut self, block: &TimeBlock) -> Result<()> {
        let Some(clipped) = block.clip(self.span_start, self.span_end) else {
            return Ok(());
        };

        // Grow the interval over every busy block it overlaps.
        let mut merged_start = clipped.start();
        let mut merged_end = clipped.end();
        let mut labels: Vec<&str> = Vec::new();
        for existing in self.blocks.iter().filter(|b| b.is_busy()) {
            if existing.overlaps(clipped.start(), clipped.end()) {
                merged_start = merged_start.min(existing.start());
                merged_end = merged_end.max(existing.end());
                push_labels(&mut labels, existing.label());
            }
        }
        push_labels(&mut labels, clipped.label());
        let merged = TimeBlock::busy(merged_start, merged_end, labels.join(LABEL_SEPARATOR))?;

        let mut spliced = Vec::with_capacity(self.blocks.len() + 2);
        let mut placed = false;
        for existing in &self.blocks {
            if !existing.overlaps(merged_start, merged_end) {
                if !placed && existing.start() >= merged_end {
                    spliced.push(merged.clone());
                    placed = true;
                }
                spliced.push(existing.clone());
                continue;
            }
            if let Some(before) = existing.clip(existing.start(), merged_start) {
                spliced.push(before);
            }
            if !placed {
                spliced.push(merged.clone());
                placed = true;
            }
            if let Some(after) = existing.clip(merged_end, existing.end()) {
                spliced.push(after);
            }
        }
        if !placed {
            spliced.push(merged);
        }

        self.blocks = spliced;
        debug_assert!(self.is_partitioned(), "insert_busy broke partition of {}", self.date);
        Ok(())
    }

    /// Narrow the span to `[start, end)`, clipping blocks and dropping those outside.
    pub(crate) fn restrict(&mut self, start: DateTime<Tz>, end: DateTime<Tz>) {
        let start = start.max(self.span_start);
        let end = end.min(self.span_end).max(start);
        self.blocks = self
            .blocks
            .iter()
            .filter_map(|b| b.clip(start, end))
            .collect();
        self.span_start = start;
        self.span_end = end;
    }
}

const LABEL_SEPARATOR: &str = ", ";

/// Append the parts of a (possibly already merged) label not seen yet.
fn push_labels<'a>(labels: &mut Vec<&'a str>, label: &'a str) {
    for part in label.split(LABEL_SEPARATOR) {
        if !labels.contains(&part) {
            labels.push(part);
        }
    }
}

/// Build one initialized [`DayTimeline`] per day from `begin` to `end` inclusive.
///
/// # Errors
/// Returns `MeetsError::InvalidRange` if `end` precedes `begin`.
pub fn build_day_list(begin: NaiveDate, end: NaiveDate, tz: Tz) -> Result<Vec<DayTimeline>> {
    if end < begin {
        return Err(MeetsError::InvalidRange {
            begin: begin.to_string(),
            end: end.to_string(),
        });
    }

    let mut days = Vec::new();
    for date in begin.iter_days().take_while(|d| *d <= end) {
        match DayTimeline::new(date, tz)? {
            Some(day) => days.push(day),
            None => tracing::debug!(%date, tz = tz.name(), "skipping date absent from timezone"),
        }
    }
    Ok(days)
}
