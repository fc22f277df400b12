//! Document-store collaborators and an in-memory implementation.
//!
//! The engine talks to realtors, blocked intervals and tours through three
//! traits. [`MemoryStore`] implements all of them behind a single mutex and can
//! round-trip its contents through a JSON snapshot file.

use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::model::{
    BlockedId, BlockedInterval, Booking, BookingId, BookingStatus, NewBlockedInterval, NewRealtor,
    Realtor, RealtorId, WorkingHours,
};
use crate::time::TimeOfDay;

pub trait RealtorDirectory {
    fn create_realtor(&self, realtor: NewRealtor) -> Result<RealtorId>;
    fn list_realtors(&self) -> Result<Vec<Realtor>>;
    fn get_realtor(&self, id: &RealtorId) -> Result<Option<Realtor>>;
}

pub trait BlockedSlotStore {
    fn create_blocked(&self, blocked: NewBlockedInterval) -> Result<BlockedId>;

    /// Blocks for `realtor_id` dated within `start..=end`.
    fn blocked_in_range(
        &self,
        realtor_id: &RealtorId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BlockedInterval>>;
}

/// Admission check run against the active tours for one realtor and date.
pub type Admission<'a> = &'a dyn Fn(&[Booking]) -> Result<()>;

/// Check run before a cancelled tour becomes active again, given that tour and
/// the active tours sharing its realtor and date.
pub type Reactivation<'a> = &'a dyn Fn(&Booking, &[Booking]) -> Result<()>;

pub trait BookingStore {
    /// Non-cancelled tours for `realtor_id` on `date`.
    fn active_bookings(&self, realtor_id: &RealtorId, date: NaiveDate) -> Result<Vec<Booking>>;

    /// Insert `booking` only if `admit` accepts the current active tours for its
    /// realtor and date. The read, the check and the write happen atomically with
    /// respect to every other call on the same store.
    fn insert_if(&self, booking: Booking, admit: Admission<'_>) -> Result<BookingId>;

    fn bookings_by_client_email(&self, email: &str) -> Result<Vec<Booking>>;

    /// Change a tour's status. Moving a cancelled tour back to an active status
    /// runs `reactivate` first, under the same atomicity as [`insert_if`].
    ///
    /// [`insert_if`]: BookingStore::insert_if
    fn set_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
        reactivate: Reactivation<'_>,
    ) -> Result<Booking>;
}

/// Everything the store holds, in snapshot form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub realtors: Vec<Realtor>,
    #[serde(default)]
    pub blocked_slots: Vec<BlockedInterval>,
    #[serde(default)]
    pub tours: Vec<Booking>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore {
            inner: Mutex::new(snapshot),
        }
    }

    /// Load a JSON snapshot. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no snapshot, starting empty");
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the current contents as pretty-printed JSON.
    ///
    /// The snapshot goes to a temporary file in the same directory and is renamed
    /// over `path`, so readers see either the old or the new contents in full.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.lock()?)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>> {
        self.inner
            .lock()
            .map_err(|_| ScheduleError::Store("store lock poisoned".to_string()))
    }
}

fn active_for(tours: &[Booking], realtor_id: &RealtorId, date: NaiveDate) -> Vec<Booking> {
    tours
        .iter()
        .filter(|t| &t.realtor_id == realtor_id && t.date == date && t.status.is_active())
        .cloned()
        .collect()
}

impl RealtorDirectory for MemoryStore {
    fn create_realtor(&self, realtor: NewRealtor) -> Result<RealtorId> {
        realtor.validate()?;
        let id = RealtorId::generate();
        self.lock()?.realtors.push(Realtor {
            id: id.clone(),
            name: realtor.name,
            email: realtor.email,
            phone: realtor.phone,
            working_hours: realtor.working_hours,
            working_days: realtor.working_days,
            timezone: realtor.timezone,
        });
        Ok(id)
    }

    fn list_realtors(&self) -> Result<Vec<Realtor>> {
        Ok(self.lock()?.realtors.clone())
    }

    fn get_realtor(&self, id: &RealtorId) -> Result<Option<Realtor>> {
        Ok(self.lock()?.realtors.iter().find(|r| &r.id == id).cloned())
    }
}

impl BlockedSlotStore for MemoryStore {
    fn create_blocked(&self, blocked: NewBlockedInterval) -> Result<BlockedId> {
        blocked.validate()?;
        let id = BlockedId::generate();
        self.lock()?.blocked_slots.push(BlockedInterval {
            id: id.clone(),
            realtor_id: blocked.realtor_id,
            date: blocked.date,
            start_time: blocked.start_time,
            end_time: blocked.end_time,
            reason: blocked.reason,
            is_recurring: blocked.is_recurring,
        });
        Ok(id)
    }

    fn blocked_in_range(
        &self,
        realtor_id: &RealtorId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BlockedInterval>> {
        Ok(self
            .lock()?
            .blocked_slots
            .iter()
            .filter(|b| &b.realtor_id == realtor_id && b.date >= start && b.date <= end)
            .cloned()
            .collect())
    }
}

impl BookingStore for MemoryStore {
    fn active_bookings(&self, realtor_id: &RealtorId, date: NaiveDate) -> Result<Vec<Booking>> {
        Ok(active_for(&self.lock()?.tours, realtor_id, date))
    }

    fn insert_if(&self, booking: Booking, admit: Admission<'_>) -> Result<BookingId> {
        let mut inner = self.lock()?;
        let existing = active_for(&inner.tours, &booking.realtor_id, booking.date);
        admit(&existing)?;

        let id = booking.id.clone();
        inner.tours.push(booking);
        Ok(id)
    }

    fn bookings_by_client_email(&self, email: &str) -> Result<Vec<Booking>> {
        Ok(self
            .lock()?
            .tours
            .iter()
            .filter(|t| t.client.client_email == email)
            .cloned()
            .collect())
    }

    fn set_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
        reactivate: Reactivation<'_>,
    ) -> Result<Booking> {
        let mut inner = self.lock()?;
        let index = inner
            .tours
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| ScheduleError::NotFound(format!("tour {id}")))?;

        let current = &inner.tours[index];
        if !current.status.is_active() && status.is_active() {
            let existing = active_for(&inner.tours, &current.realtor_id, current.date);
            reactivate(current, &existing)?;
        }

        let tour = &mut inner.tours[index];
        tour.status = status;
        Ok(tour.clone())
    }
}

/// Register the two demo realtors used by the booking widget.
pub fn seed_sample_realtors(directory: &dyn RealtorDirectory) -> Result<Vec<RealtorId>> {
    let hours = |start: &str, end: &str| -> Result<WorkingHours> {
        Ok(WorkingHours::new(start.parse::<TimeOfDay>()?, end.parse::<TimeOfDay>()?))
    };

    let samples = [
        NewRealtor {
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            working_hours: hours("09:00", "17:00")?,
            working_days: vec![1, 2, 3, 4, 5],
            timezone: "America/New_York".to_string(),
        },
        NewRealtor {
            name: "Mike Chen".to_string(),
            email: "mike@example.com".to_string(),
            phone: "(555) 987-6543".to_string(),
            working_hours: hours("10:00", "18:00")?,
            working_days: vec![1, 2, 3, 4, 5, 6],
            timezone: "America/New_York".to_string(),
        },
    ];

    samples
        .into_iter()
        .map(|realtor| directory.create_realtor(realtor))
        .collect()
}
