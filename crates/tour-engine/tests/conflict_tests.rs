//! Tests for booking conflict detection.

use tour_engine::conflict::overlaps;
use tour_engine::{find_conflicts, has_conflict, Interval};

fn iv(start: &str, end: &str) -> Interval {
    Interval::parse(start, end).unwrap()
}

#[test]
fn touching_boundary_is_not_a_conflict() {
    assert!(!has_conflict(&iv("10:00", "10:30"), &[iv("10:30", "11:00")]));
    assert!(!has_conflict(&iv("11:00", "11:30"), &[iv("10:30", "11:00")]));
}

#[test]
fn containment_is_a_conflict() {
    assert!(has_conflict(&iv("10:00", "11:00"), &[iv("10:30", "11:00")]));
}

#[test]
fn proposed_starting_inside_existing_conflicts() {
    assert!(has_conflict(&iv("10:15", "10:45"), &[iv("10:00", "10:30")]));
}

#[test]
fn proposed_ending_inside_existing_conflicts() {
    assert!(has_conflict(&iv("09:45", "10:15"), &[iv("10:00", "10:30")]));
}

#[test]
fn identical_intervals_conflict() {
    assert!(has_conflict(&iv("10:00", "10:30"), &[iv("10:00", "10:30")]));
}

#[test]
fn no_existing_tours_no_conflict() {
    assert!(!has_conflict(&iv("10:00", "10:30"), &[]));
}

#[test]
fn disjoint_tours_no_conflict() {
    let existing = vec![iv("09:00", "09:30"), iv("11:00", "11:30")];
    assert!(!has_conflict(&iv("10:00", "10:30"), &existing));
}

#[test]
fn find_conflicts_reports_each_overlap_with_minutes() {
    let existing = vec![
        iv("09:00", "09:30"),
        iv("09:30", "10:00"),
        iv("10:30", "11:00"),
        iv("12:00", "12:30"),
    ];

    let conflicts = find_conflicts(&iv("09:15", "10:45"), &existing);

    assert_eq!(conflicts.len(), 3, "12:00 tour does not overlap");
    assert_eq!(conflicts[0].overlap_minutes, 15);
    assert_eq!(conflicts[1].overlap_minutes, 30);
    assert_eq!(conflicts[2].overlap_minutes, 15);
    assert_eq!(conflicts[2].existing, iv("10:30", "11:00"));
}

#[test]
fn overlap_is_symmetric_for_well_formed_intervals() {
    let a = iv("10:00", "11:00");
    let b = iv("10:30", "11:30");
    assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
}
