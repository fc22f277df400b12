//! Enumerate candidate slot start times inside a working window.

use crate::error::{Result, ScheduleError};
use crate::time::TimeOfDay;

/// Default tour length and slot spacing.
pub const DEFAULT_GRANULARITY_MINUTES: i64 = 30;

/// Generate slot start times from `start`, stepping by `granularity_minutes`,
/// while the current time is strictly before `end`.
///
/// The window is half-open, so a slot starting exactly at `end` is excluded.
/// An empty or inverted window yields an empty list. Enumeration never crosses
/// midnight.
///
/// # Errors
/// Returns `ScheduleError::InvalidArgument` if `granularity_minutes <= 0`.
pub fn enumerate_slots(
    start: TimeOfDay,
    end: TimeOfDay,
    granularity_minutes: i64,
) -> Result<Vec<TimeOfDay>> {
    ensure_granularity(granularity_minutes)?;

    let mut slots = Vec::new();
    let mut current = Some(start);
    while let Some(slot) = current.filter(|&t| t < end) {
        slots.push(slot);
        current = slot.checked_add_minutes(granularity_minutes);
    }

    Ok(slots)
}

/// End time for a tour starting at `start` that lasts one slot.
///
/// # Errors
/// Returns `ScheduleError::InvalidArgument` for a non-positive granularity or when
/// the tour would run past midnight.
pub fn slot_end(start: TimeOfDay, granularity_minutes: i64) -> Result<TimeOfDay> {
    ensure_granularity(granularity_minutes)?;
    start.checked_add_minutes(granularity_minutes).ok_or_else(|| {
        ScheduleError::InvalidArgument(format!(
            "a {granularity_minutes}-minute slot at {start} runs past midnight"
        ))
    })
}

pub(crate) fn ensure_granularity(granularity_minutes: i64) -> Result<()> {
    if granularity_minutes <= 0 {
        return Err(ScheduleError::InvalidArgument(format!(
            "slot granularity must be positive, got {granularity_minutes}"
        )));
    }
    Ok(())
}
