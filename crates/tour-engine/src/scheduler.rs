//! Booking creation and the request-level entry points used by clients.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::availability::{self, SlotAvailability};
use crate::clock::{local_now, Clock};
use crate::config::EngineConfig;
use crate::conflict::find_conflicts;
use crate::error::{Result, ScheduleError};
use crate::model::{Booking, BookingId, BookingRequest, BookingStatus, Realtor, RealtorId};
use crate::slots::enumerate_slots;
use crate::store::{BlockedSlotStore, BookingStore, RealtorDirectory};
use crate::time::Interval;

/// Persist a tour unless it overlaps an active tour for the same realtor and date.
///
/// The conflict check and the insert run as one atomic store operation, so two
/// racing requests for the same slot produce exactly one tour.
///
/// # Errors
/// Returns `ScheduleError::InvalidArgument` if the interval is empty or inverted,
/// and `ScheduleError::Conflict` (with nothing written) on overlap.
pub fn schedule_booking(
    store: &dyn BookingStore,
    request: BookingRequest,
    created_at: DateTime<Utc>,
) -> Result<BookingId> {
    let proposed = request.interval();
    if proposed.start >= proposed.end {
        return Err(ScheduleError::InvalidArgument(format!(
            "tour must end after it starts, got {}-{}",
            proposed.start, proposed.end
        )));
    }

    let booking = Booking {
        id: BookingId::generate(),
        realtor_id: request.realtor_id,
        client: request.client,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        status: BookingStatus::Scheduled,
        notes: request.notes,
        created_at,
    };
    let date = booking.date;
    let realtor_id = booking.realtor_id.clone();

    let admit = |existing: &[Booking]| reject_overlap(&realtor_id, date, &proposed, existing);
    let id = store.insert_if(booking, &admit)?;
    info!(tour = %id, realtor = %realtor_id, %date, start = %proposed.start, "scheduled tour");
    Ok(id)
}

/// Fail with `Conflict` if `proposed` overlaps any of the `existing` active tours.
fn reject_overlap(
    realtor_id: &RealtorId,
    date: NaiveDate,
    proposed: &Interval,
    existing: &[Booking],
) -> Result<()> {
    let intervals: Vec<Interval> = existing.iter().map(Booking::interval).collect();
    let conflicts = find_conflicts(proposed, &intervals);
    if conflicts.is_empty() {
        return Ok(());
    }
    warn!(
        realtor = %realtor_id,
        %date,
        start = %proposed.start,
        end = %proposed.end,
        conflicts = conflicts.len(),
        "rejected overlapping tour"
    );
    Err(ScheduleError::Conflict {
        date,
        start: proposed.start,
        end: proposed.end,
    })
}

/// Status change that re-checks a cancelled tour's slot before reviving it.
fn change_status(store: &dyn BookingStore, id: &BookingId, status: BookingStatus) -> Result<Booking> {
    let reactivate = |tour: &Booking, existing: &[Booking]| {
        reject_overlap(&tour.realtor_id, tour.date, &tour.interval(), existing)
    };
    store.set_status(id, status, &reactivate)
}

/// Ties the store, a clock and the engine configuration together.
pub struct Scheduler<S, C> {
    store: S,
    clock: C,
    config: EngineConfig,
}

impl<S, C> Scheduler<S, C>
where
    S: RealtorDirectory + BlockedSlotStore + BookingStore,
    C: Clock,
{
    /// # Errors
    /// Returns `ScheduleError::InvalidArgument` for a non-positive granularity.
    pub fn new(store: S, clock: C, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Scheduler {
            store,
            clock,
            config,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn realtor(&self, id: &RealtorId) -> Result<Realtor> {
        self.store
            .get_realtor(id)?
            .ok_or_else(|| ScheduleError::NotFound(format!("realtor {id}")))
    }

    /// Slots for a realtor on `date`, evaluated against the realtor's local "now".
    ///
    /// Every slot is unavailable on a non-working day, a past date, or a date
    /// with a whole-day block.
    pub fn day_slots(&self, realtor_id: &RealtorId, date: NaiveDate) -> Result<Vec<SlotAvailability>> {
        let realtor = self.realtor(realtor_id)?;
        let now = local_now(self.clock.now(), &realtor.timezone)?;
        let blocked = self.store.blocked_in_range(realtor_id, date, date)?;

        if !availability::is_date_selectable(&realtor, date, now.date())
            || availability::is_day_fully_blocked(&blocked, date)
        {
            let hours = realtor.working_hours;
            return Ok(enumerate_slots(hours.start, hours.end, self.config.granularity_minutes)?
                .into_iter()
                .map(|time| SlotAvailability {
                    time,
                    available: false,
                })
                .collect());
        }

        let booked: Vec<Interval> = self
            .store
            .active_bookings(realtor_id, date)?
            .iter()
            .map(Booking::interval)
            .collect();

        availability::list_slots(&realtor.working_hours, date, &blocked, &booked, now, &self.config)
    }

    /// Book a tour for an existing realtor.
    ///
    /// A tour whose length differs from the configured granularity is accepted but
    /// logged.
    pub fn propose_booking(&self, request: BookingRequest) -> Result<BookingId> {
        self.realtor(&request.realtor_id)?;

        let length = request.interval().duration_minutes();
        if length != self.config.granularity_minutes {
            warn!(
                realtor = %request.realtor_id,
                length,
                expected = self.config.granularity_minutes,
                "tour length differs from slot granularity"
            );
        }

        schedule_booking(&self.store, request, self.clock.now())
    }

    /// Active tours for a realtor on `date`.
    pub fn tours(&self, realtor_id: &RealtorId, date: NaiveDate) -> Result<Vec<Booking>> {
        self.store.active_bookings(realtor_id, date)
    }

    /// Confirming a cancelled tour fails with `Conflict` if its slot was rebooked.
    pub fn confirm(&self, id: &BookingId) -> Result<Booking> {
        let tour = change_status(&self.store, id, BookingStatus::Confirmed)?;
        info!(tour = %id, "confirmed tour");
        Ok(tour)
    }

    /// Cancelling frees the slot for new bookings.
    pub fn cancel(&self, id: &BookingId) -> Result<Booking> {
        let tour = change_status(&self.store, id, BookingStatus::Cancelled)?;
        info!(tour = %id, "cancelled tour");
        Ok(tour)
    }
}
