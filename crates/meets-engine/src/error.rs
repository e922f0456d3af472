//! Error types for meets-engine operations.

use thiserror::Error;

use crate::agenda::Phase;

#[derive(Error, Debug)]
pub enum MeetsError {
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Invalid range: end date {end} precedes begin date {begin}")]
    InvalidRange { begin: String, end: String },

    #[error("Invalid window: end time {end} is not after begin time {begin}")]
    InvalidWindow { begin: String, end: String },

    #[error("Invalid state: cannot {operation} while agenda is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Time '{0}' didn't match accepted formats 13:30 or 1:30pm")]
    InvalidTimeOfDay(String),

    #[error("Date '{0}' didn't fit expected format 12/31/2001")]
    InvalidDate(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Local time {0} does not exist in timezone {1}")]
    UnresolvableLocalTime(String, String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MeetsError>;
