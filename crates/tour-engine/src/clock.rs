//! Sources of "now", and conversion into a realtor's local wall clock.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Convert an instant to wall-clock time in the given IANA timezone.
///
/// # Errors
/// Returns `ScheduleError::InvalidTimezone` if `timezone` is not a known IANA name.
pub fn local_now(instant: DateTime<Utc>, timezone: &str) -> Result<NaiveDateTime> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))?;
    Ok(instant.with_timezone(&tz).naive_local())
}
