//! Property-based tests for slot enumeration and overlap detection.
//!
//! These check invariants that should hold for *any* working window and
//! granularity, not just the fixed cases in `slots_tests.rs`.

use proptest::prelude::*;
use tour_engine::conflict::overlaps;
use tour_engine::{enumerate_slots, has_conflict, Interval, TimeOfDay};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (0u32..24 * 60).prop_map(|m| TimeOfDay::from_minutes(m).unwrap())
}

fn arb_granularity() -> impl Strategy<Value = i64> {
    prop_oneof![Just(15i64), Just(30), Just(45), Just(60), 1i64..=240]
}

/// A non-empty interval within one day.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0u32..24 * 60 - 1)
        .prop_flat_map(|start| (Just(start), start + 1..24 * 60))
        .prop_map(|(start, end)| {
            Interval::new(
                TimeOfDay::from_minutes(start).unwrap(),
                TimeOfDay::from_minutes(end).unwrap(),
            )
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn slots_are_strictly_increasing_and_inside_window(
        start in arb_time(),
        end in arb_time(),
        granularity in arb_granularity(),
    ) {
        let slots = enumerate_slots(start, end, granularity).unwrap();

        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert_eq!(
                i64::from(pair[1].minutes() - pair[0].minutes()),
                granularity
            );
        }
        for slot in &slots {
            prop_assert!(*slot >= start && *slot < end);
        }
        if start < end {
            prop_assert_eq!(slots.first().copied(), Some(start));
        } else {
            prop_assert!(slots.is_empty());
        }
    }

    #[test]
    fn slot_count_matches_window_length(
        start in arb_time(),
        end in arb_time(),
        granularity in arb_granularity(),
    ) {
        let slots = enumerate_slots(start, end, granularity).unwrap();
        let span = i64::from(end.minutes()) - i64::from(start.minutes());
        let expected = if span <= 0 { 0 } else { (span + granularity - 1) / granularity };
        prop_assert_eq!(slots.len() as i64, expected);
    }

    #[test]
    fn triple_clause_overlap_matches_simple_form(a in arb_interval(), b in arb_interval()) {
        let simple = a.start < b.end && a.end > b.start;
        prop_assert_eq!(overlaps(&a, &b), simple);
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn touching_intervals_never_conflict(a in arb_interval(), len in 1u32..120) {
        let end = a.end.minutes() + len;
        prop_assume!(end < 24 * 60);
        let next = Interval::new(a.end, TimeOfDay::from_minutes(end).unwrap());
        prop_assert!(!has_conflict(&a, &[next]));
        prop_assert!(!has_conflict(&next, &[a]));
    }

    #[test]
    fn wire_format_round_trips(time in arb_time()) {
        let text = time.to_string();
        prop_assert_eq!(text.len(), 5);
        prop_assert_eq!(text.parse::<TimeOfDay>().unwrap(), time);
    }
}
