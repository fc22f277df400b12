//! Wall-clock time-of-day values and half-open intervals.
//!
//! Times travel on the wire as zero-padded 24-hour `HH:mm` strings and dates as
//! `YYYY-MM-DD`. Internally a [`TimeOfDay`] is a minute-of-day integer, so all
//! ordering comparisons are numeric rather than relying on string layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision, no timezone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from hour and minute. Returns `None` outside `00:00..=23:59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    /// Build from a minute-of-day count. Returns `None` at or past midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(TimeOfDay(minutes as u16))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Add minutes without crossing midnight.
    pub fn checked_add_minutes(self, minutes: i64) -> Option<Self> {
        let total = i64::from(self.minutes()).checked_add(minutes)?;
        u32::try_from(total).ok().and_then(Self::from_minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidArgument(format!("malformed time '{s}', expected HH:mm"));

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
            return Err(invalid());
        }

        let hour: u32 = s[..2].parse().map_err(|_| invalid())?;
        let minute: u32 = s[3..].parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A half-open `[start, end)` interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    #[serde(rename = "startTime")]
    pub start: TimeOfDay,
    #[serde(rename = "endTime")]
    pub end: TimeOfDay,
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Interval { start, end }
    }

    /// Parse both ends from `HH:mm` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Interval::new(start.parse()?, end.parse()?))
    }

    /// True when `time` falls in `[start, end)`.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time >= self.start && time < self.end
    }

    /// Length in minutes; zero for empty or inverted intervals.
    pub fn duration_minutes(&self) -> i64 {
        (i64::from(self.end.minutes()) - i64::from(self.start.minutes())).max(0)
    }
}
