//! The `TimeBlock` value type: one contiguous interval tagged free or busy.

use std::fmt;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{MeetsError, Result};

/// Label given to free blocks created by the engine.
pub const FREE_LABEL: &str = "free time";

/// Whether a block is available for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Free,
    Busy,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Free => f.write_str("free"),
            BlockKind::Busy => f.write_str("busy"),
        }
    }
}

/// An immutable half-open interval `[start, end)` with a kind and a label.
///
/// `start < end` is guaranteed by construction. The label is descriptive only
/// (an event summary, or [`FREE_LABEL`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBlock {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    kind: BlockKind,
    label: String,
}

impl TimeBlock {
    /// Create a block, rejecting empty or inverted intervals.
    ///
    /// # Errors
    /// Returns `MeetsError::InvalidInterval` if `end <= start`.
    pub fn new(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        kind: BlockKind,
        label: impl Into<String>,
    ) -> Result<Self> {
        if end <= start {
            return Err(MeetsError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self {
            start,
            end,
            kind,
            label: label.into(),
        })
    }

    pub fn free(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        Self::new(start, end, BlockKind::Free, FREE_LABEL)
    }

    pub fn busy(start: DateTime<Tz>, end: DateTime<Tz>, label: impl Into<String>) -> Result<Self> {
        Self::new(start, end, BlockKind::Busy, label)
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_free(&self) -> bool {
        self.kind == BlockKind::Free
    }

    pub fn is_busy(&self) -> bool {
        self.kind == BlockKind::Busy
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// True when this block and `[start, end)` share at least one instant.
    ///
    /// Adjacent intervals (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> bool {
        self.start < end && start < self.end
    }

    /// The part of this block inside `[start, end)`, or `None` if that part is empty.
    pub fn clip(&self, start: DateTime<Tz>, end: DateTime<Tz>) -> Option<TimeBlock> {
        let clipped_start = self.start.max(start);
        let clipped_end = self.end.min(end);
        if clipped_start >= clipped_end {
            return None;
        }
        Some(TimeBlock {
            start: clipped_start,
            end: clipped_end,
            kind: self.kind,
            label: self.label.clone(),
        })
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} ({})",
            self.kind,
            self.start.to_rfc3339(),
            self.end.to_rfc3339(),
            self.label
        )
    }
}
