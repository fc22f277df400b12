//! Per-slot availability for one realtor on one date.
//!
//! Combines the working window, blocked intervals and booked tours into a
//! bookable/unbookable verdict for every candidate slot. "Now" is always passed in
//! by the caller as a realtor-local wall-clock time so results are reproducible.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;

use crate::config::{CutoffPolicy, EngineConfig};
use crate::error::Result;
use crate::model::{BlockedInterval, Realtor, WorkingHours};
use crate::slots::enumerate_slots;
use crate::time::{Interval, TimeOfDay};

/// One candidate slot and whether it can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub time: TimeOfDay,
    pub available: bool,
}

/// How elapsed time restricts slots on the queried date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedCutoff {
    /// Nothing has elapsed.
    Open,
    /// Slots strictly before this time have elapsed.
    Before(TimeOfDay),
    /// The whole date is in the past.
    Closed,
}

impl ElapsedCutoff {
    fn admits(self, slot: TimeOfDay) -> bool {
        match self {
            ElapsedCutoff::Open => true,
            ElapsedCutoff::Before(cutoff) => slot >= cutoff,
            ElapsedCutoff::Closed => false,
        }
    }
}

/// The earliest slot start still bookable today.
///
/// `now` is rounded up to the next granularity boundary measured from the start of
/// working hours, then capped at the working end time.
pub fn next_bookable_time(
    now: NaiveDateTime,
    working_hours: &WorkingHours,
    granularity_minutes: i64,
) -> TimeOfDay {
    let time = now.time();
    let mut now_minutes = i64::from(time.hour() * 60 + time.minute());
    if time.second() > 0 || time.nanosecond() > 0 {
        now_minutes += 1;
    }

    let start = i64::from(working_hours.start.minutes());
    let end = i64::from(working_hours.end.minutes());
    let rounded = if now_minutes <= start || granularity_minutes <= 0 {
        start.max(now_minutes)
    } else {
        let steps = (now_minutes - start + granularity_minutes - 1) / granularity_minutes;
        start + steps * granularity_minutes
    };

    u32::try_from(rounded.min(end))
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .unwrap_or(working_hours.end)
}

/// Resolve the elapsed-time cutoff for `date` under the configured policy.
pub fn elapsed_cutoff(
    date: NaiveDate,
    now: NaiveDateTime,
    working_hours: &WorkingHours,
    config: &EngineConfig,
) -> ElapsedCutoff {
    let today = now.date();
    let next = || ElapsedCutoff::Before(next_bookable_time(now, working_hours, config.granularity_minutes));

    match config.cutoff {
        CutoffPolicy::Always => next(),
        CutoffPolicy::SameDayOnly if date < today => ElapsedCutoff::Closed,
        CutoffPolicy::SameDayOnly if date == today => next(),
        CutoffPolicy::SameDayOnly => ElapsedCutoff::Open,
    }
}

/// Whether `slot` on `date` can be booked.
///
/// Checks, in order, stopping at the first failure:
/// 1. a whole-day block on `date`;
/// 2. a blocked window containing the slot;
/// 3. a booked tour containing the slot;
/// 4. the slot having already elapsed relative to `now`.
///
/// Blocks for other dates are ignored.
pub fn is_available(
    slot: TimeOfDay,
    date: NaiveDate,
    blocked: &[BlockedInterval],
    booked: &[Interval],
    working_hours: &WorkingHours,
    now: NaiveDateTime,
    config: &EngineConfig,
) -> bool {
    let same_day = || blocked.iter().filter(move |b| b.date == date);

    if same_day().any(BlockedInterval::blocks_whole_day) {
        return false;
    }

    if same_day()
        .filter_map(BlockedInterval::interval)
        .any(|window| window.contains(slot))
    {
        return false;
    }

    if booked.iter().any(|tour| tour.contains(slot)) {
        return false;
    }

    elapsed_cutoff(date, now, working_hours, config).admits(slot)
}

/// Enumerate every slot in the working window and evaluate its availability.
///
/// # Errors
/// Returns `ScheduleError::InvalidArgument` if the configured granularity is not
/// positive.
pub fn list_slots(
    working_hours: &WorkingHours,
    date: NaiveDate,
    blocked: &[BlockedInterval],
    booked: &[Interval],
    now: NaiveDateTime,
    config: &EngineConfig,
) -> Result<Vec<SlotAvailability>> {
    let slots = enumerate_slots(working_hours.start, working_hours.end, config.granularity_minutes)?;

    let listed: Vec<SlotAvailability> = slots
        .into_iter()
        .map(|time| SlotAvailability {
            time,
            available: is_available(time, date, blocked, booked, working_hours, now, config),
        })
        .collect();

    debug!(
        %date,
        slots = listed.len(),
        open = listed.iter().filter(|s| s.available).count(),
        "listed slots"
    );

    Ok(listed)
}

/// Whether any block takes out all of `date`.
pub fn is_day_fully_blocked(blocked: &[BlockedInterval], date: NaiveDate) -> bool {
    blocked
        .iter()
        .any(|b| b.date == date && b.blocks_whole_day())
}

/// Whether a client may pick `date` at all: a working day for the realtor and not
/// before `today`.
pub fn is_date_selectable(realtor: &Realtor, date: NaiveDate, today: NaiveDate) -> bool {
    realtor.works_on(date.weekday()) && date >= today
}
