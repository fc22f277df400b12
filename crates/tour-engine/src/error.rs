//! Error types for tour-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::time::TimeOfDay;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The proposed tour overlaps a non-cancelled tour already on the books.
    #[error("Time slot {start}-{end} on {date} conflicts with an existing tour")]
    Conflict {
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
