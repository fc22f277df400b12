//! Detect overlap between a proposed tour and tours already booked.
//!
//! Intervals are half-open. A tour ending exactly when another starts is NOT a
//! conflict.

use serde::Serialize;

use crate::time::Interval;

/// A detected conflict between the proposed interval and one existing interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub proposed: Interval,
    pub existing: Interval,
    pub overlap_minutes: i64,
}

/// Whether `a` and `b` overlap.
///
/// Covers `a` starting inside `b`, `a` ending inside `b`, and `a` containing `b`.
/// Equivalent to `a.start < b.end && a.end > b.start` for well-formed intervals.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    (a.start >= b.start && a.start < b.end)
        || (a.end > b.start && a.end <= b.end)
        || (a.start <= b.start && a.end >= b.end)
}

/// Whether `proposed` overlaps any interval in `existing`.
pub fn has_conflict(proposed: &Interval, existing: &[Interval]) -> bool {
    existing.iter().any(|e| overlaps(proposed, e))
}

/// Every interval in `existing` that overlaps `proposed`, with overlap length.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`, clamped at
/// zero for degenerate input.
pub fn find_conflicts(proposed: &Interval, existing: &[Interval]) -> Vec<Conflict> {
    existing
        .iter()
        .filter(|e| overlaps(proposed, e))
        .map(|e| {
            let overlap = Interval::new(proposed.start.max(e.start), proposed.end.min(e.end));
            Conflict {
                proposed: *proposed,
                existing: *e,
                overlap_minutes: overlap.duration_minutes(),
            }
        })
        .collect()
}
