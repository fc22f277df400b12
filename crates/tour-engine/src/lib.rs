//! # tour-engine
//!
//! Slot availability and booking conflict detection for realtor property tours.
//!
//! A client picks a realtor, a date and a time slot. The engine enumerates the
//! realtor's candidate slots for that date, decides which can still be booked
//! given blocked periods, existing tours and the current time, and rejects any
//! new tour that would overlap one already on the books.
//!
//! ## Modules
//!
//! - [`time`] — `HH:mm` time-of-day values and half-open intervals
//! - [`slots`] — Enumerate candidate slots within working hours
//! - [`availability`] — Per-slot bookable verdicts
//! - [`conflict`] — Overlap detection between tours
//! - [`scheduler`] — Atomic booking creation and request-level entry points
//! - [`store`] — Store traits and the in-memory/JSON snapshot store
//! - [`model`] — Realtor, blocked interval and tour records
//! - [`clock`] — Sources of "now" and timezone localization
//! - [`config`] — Engine configuration
//! - [`error`] — Error types

pub mod availability;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod slots;
pub mod store;
pub mod time;

pub use availability::{is_available, list_slots, SlotAvailability};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CutoffPolicy, EngineConfig};
pub use conflict::{find_conflicts, has_conflict};
pub use error::ScheduleError;
pub use model::{
    BlockedInterval, Booking, BookingId, BookingRequest, BookingStatus, ClientInfo, Realtor,
    RealtorId, WorkingHours,
};
pub use scheduler::{schedule_booking, Scheduler};
pub use slots::{enumerate_slots, slot_end};
pub use store::MemoryStore;
pub use time::{Interval, TimeOfDay};
