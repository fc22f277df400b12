//! Records exchanged with the document store: realtors, blocked intervals and tours.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ScheduleError};
use crate::time::{Interval, TimeOfDay};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Mint a fresh random identifier.
            pub fn generate() -> Self {
                $name(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }
    };
}

string_id!(RealtorId);
string_id!(BookingId);
string_id!(BlockedId);

/// A realtor's daily working window, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl WorkingHours {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        WorkingHours { start, end }
    }
}

/// A realtor as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realtor {
    pub id: RealtorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub working_hours: WorkingHours,
    /// Weekday numbers, `0` = Sunday through `6` = Saturday.
    pub working_days: Vec<u8>,
    /// IANA timezone name, e.g. `America/New_York`.
    pub timezone: String,
}

impl Realtor {
    pub fn works_on(&self, weekday: Weekday) -> bool {
        let day = weekday.num_days_from_sunday() as u8;
        self.working_days.contains(&day)
    }
}

/// Fields needed to register a realtor; the directory assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRealtor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub working_hours: WorkingHours,
    pub working_days: Vec<u8>,
    pub timezone: String,
}

impl NewRealtor {
    /// Reject weekday numbers outside `0..=6` and unknown IANA timezones.
    pub fn validate(&self) -> Result<()> {
        if let Some(day) = self.working_days.iter().find(|&&d| d > 6) {
            return Err(ScheduleError::InvalidArgument(format!(
                "working day {day} is outside 0 (Sunday) to 6 (Saturday)"
            )));
        }
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| ScheduleError::InvalidTimezone(self.timezone.clone()))?;
        Ok(())
    }
}

/// A blocked period on one date. Without both times the whole date is blocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedInterval {
    pub id: BlockedId,
    pub realtor_id: RealtorId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Stored as given; recurrence is not expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl BlockedInterval {
    /// A block covering the entire date.
    pub fn whole_day(realtor_id: RealtorId, date: NaiveDate) -> Self {
        BlockedInterval {
            id: BlockedId::generate(),
            realtor_id,
            date,
            start_time: None,
            end_time: None,
            reason: None,
            is_recurring: None,
        }
    }

    /// A block covering `[start, end)` on the date.
    pub fn window(realtor_id: RealtorId, date: NaiveDate, start: TimeOfDay, end: TimeOfDay) -> Self {
        BlockedInterval {
            start_time: Some(start),
            end_time: Some(end),
            ..Self::whole_day(realtor_id, date)
        }
    }

    /// The blocked window, or `None` when the whole day is blocked.
    pub fn interval(&self) -> Option<Interval> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(Interval::new(start, end)),
            _ => None,
        }
    }

    pub fn blocks_whole_day(&self) -> bool {
        self.interval().is_none()
    }
}

/// Fields needed to record a block; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlockedInterval {
    pub realtor_id: RealtorId,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub is_recurring: Option<bool>,
}

impl NewBlockedInterval {
    /// Reject a window that ends at or before its start.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                return Err(ScheduleError::InvalidArgument(format!(
                    "blocked window must end after it starts, got {start}-{end}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Scheduled,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Cancelled tours free their slot.
    pub fn is_active(self) -> bool {
        self != BookingStatus::Cancelled
    }
}

/// Contact details submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
}

/// A persisted tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub realtor_id: RealtorId,
    #[serde(flatten)]
    pub client: ClientInfo,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

/// A request to book a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub realtor_id: RealtorId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(flatten)]
    pub client: ClientInfo,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}
