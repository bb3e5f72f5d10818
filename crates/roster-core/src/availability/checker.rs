//! Concurrent-allocation conflict detection.
//!
//! Allocation over time is piecewise constant and only rises where an
//! assignment starts, so the peak load inside a window is always reached
//! either on the window's first day or on the first day of some overlapping
//! assignment. Sampling those critical points is exact; no day-by-day scan is
//! needed.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use roster_types::assignment::Assignment;
use roster_types::availability::{AvailabilityQuery, AvailabilityResult, CAPACITY_LIMIT};

/// Inclusive range overlap: touching endpoints count.
pub fn ranges_overlap(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> bool {
    start_a <= end_b && end_a >= start_b
}

/// Highest summed allocation of `overlaps` on any single day within
/// `[window_start, window_end]`.
pub fn max_concurrent_allocation(
    window_start: NaiveDate,
    window_end: NaiveDate,
    overlaps: &[Assignment],
) -> f64 {
    let mut points: BTreeSet<NaiveDate> = overlaps
        .iter()
        .map(|a| a.start_date.max(window_start))
        .collect();
    points.insert(window_start);

    points
        .into_iter()
        .filter(|point| *point <= window_end)
        .map(|point| {
            overlaps
                .iter()
                .filter(|a| a.start_date <= point && a.end_date >= point)
                .map(|a| a.allocation)
                .sum::<f64>()
        })
        .fold(0.0, f64::max)
}

/// Decide whether `query` fits next to the freelancer's existing bookings.
///
/// `candidates` is normally the repository's pre-filtered overlap set, but
/// the freelancer, overlap, and exclusion filters are re-applied here so an
/// unfiltered list yields the same decision.
///
/// Totals equal to 100 pass; only strictly greater totals are rejected.
pub fn check_availability(
    query: &AvailabilityQuery,
    candidates: &[Assignment],
) -> AvailabilityResult {
    let overlaps: Vec<Assignment> = candidates
        .iter()
        .filter(|a| a.freelancer_id == query.freelancer_id)
        .filter(|a| query.exclude_assignment_id != Some(a.id))
        .filter(|a| ranges_overlap(a.start_date, a.end_date, query.start_date, query.end_date))
        .cloned()
        .collect();

    if overlaps.is_empty() {
        tracing::debug!(
            freelancer_id = %query.freelancer_id,
            "no overlapping assignments"
        );
        return AvailabilityResult::available();
    }

    let max_utilization = max_concurrent_allocation(query.start_date, query.end_date, &overlaps);
    let total_projected_load = max_utilization + query.requested_allocation;

    tracing::debug!(
        freelancer_id = %query.freelancer_id,
        overlaps = overlaps.len(),
        max_utilization,
        requested = query.requested_allocation,
        "computed projected utilization"
    );

    if total_projected_load > CAPACITY_LIMIT {
        let project_titles = overlaps
            .iter()
            .map(|a| a.project_title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let reason = format!(
            "Overloaded: Projected utilization {total_projected_load}% \
             exceeds capacity. Conflicts with: {project_titles}"
        );
        tracing::info!(
            freelancer_id = %query.freelancer_id,
            %reason,
            "availability check rejected"
        );
        return AvailabilityResult::overloaded(reason, overlaps);
    }

    AvailabilityResult::available()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roster_types::assignment::{AssignmentId, AssignmentStatus};

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn booking(title: &str, start: NaiveDate, end: NaiveDate, allocation: f64) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: AssignmentId::new(),
            freelancer_id: "f-1".to_string(),
            project_id: format!("p-{title}"),
            project_title: title.to_string(),
            role: "Designer".to_string(),
            start_date: start,
            end_date: end,
            allocation,
            status: AssignmentStatus::Active,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn no_bookings_is_available_at_full_allocation() {
        let query = AvailabilityQuery::new("f-1", jan(1), jan(31));
        let result = check_availability(&query, &[]);
        assert!(result.is_available);
        assert!(result.reason.is_none());
        assert!(result.conflicting_assignments.is_empty());
    }

    #[test]
    fn overlap_exceeding_capacity_is_rejected() {
        let existing = vec![booking("Atlas", jan(1), jan(10), 60.0)];
        let query = AvailabilityQuery::new("f-1", jan(5), jan(15)).with_allocation(50.0);

        let result = check_availability(&query, &existing);
        assert!(!result.is_available);
        let reason = result.reason.unwrap();
        assert!(reason.contains("110%"), "{reason}");
        assert!(reason.contains("Atlas"), "{reason}");
        assert_eq!(result.conflicting_assignments, existing);
    }

    #[test]
    fn exactly_full_capacity_is_allowed() {
        let existing = vec![booking("Atlas", jan(1), jan(10), 60.0)];
        let query = AvailabilityQuery::new("f-1", jan(5), jan(15)).with_allocation(40.0);
        assert!(check_availability(&query, &existing).is_available);
    }

    #[test]
    fn only_temporal_overlap_counts() {
        let existing = vec![
            booking("Atlas", jan(1), jan(5), 80.0),
            booking("Borealis", jan(20), jan(25), 80.0),
        ];
        let query = AvailabilityQuery::new("f-1", jan(10), jan(15)).with_allocation(90.0);
        assert!(check_availability(&query, &existing).is_available);
    }

    #[test]
    fn excluded_assignment_is_ignored() {
        let existing = vec![booking("Atlas", jan(1), jan(10), 60.0)];
        let query = AvailabilityQuery::new("f-1", jan(1), jan(10))
            .with_allocation(80.0)
            .excluding(existing[0].id);
        assert!(check_availability(&query, &existing).is_available);
    }

    #[test]
    fn touching_endpoints_overlap() {
        let existing = vec![booking("Atlas", jan(1), jan(10), 60.0)];
        let query = AvailabilityQuery::new("f-1", jan(10), jan(20)).with_allocation(50.0);
        assert!(!check_availability(&query, &existing).is_available);

        let query = AvailabilityQuery::new("f-1", jan(11), jan(20)).with_allocation(50.0);
        assert!(check_availability(&query, &existing).is_available);
    }

    #[test]
    fn staggered_bookings_do_not_stack() {
        // Both overlap the window but never each other.
        let existing = vec![
            booking("Atlas", jan(1), jan(7), 50.0),
            booking("Borealis", jan(8), jan(20), 50.0),
        ];
        let query = AvailabilityQuery::new("f-1", jan(5), jan(12)).with_allocation(50.0);
        assert!(check_availability(&query, &existing).is_available);
    }

    #[test]
    fn concurrent_bookings_stack_inside_window() {
        let existing = vec![
            booking("Atlas", jan(1), jan(20), 30.0),
            booking("Borealis", jan(12), jan(14), 40.0),
        ];
        let query = AvailabilityQuery::new("f-1", jan(5), jan(18)).with_allocation(40.0);

        let result = check_availability(&query, &existing);
        assert!(!result.is_available);
        let reason = result.reason.unwrap();
        assert!(reason.contains("110%"), "{reason}");
        assert!(reason.ends_with("Conflicts with: Atlas, Borealis"), "{reason}");
    }

    #[test]
    fn booking_starting_before_window_is_sampled_at_window_start() {
        let existing = vec![booking("Atlas", jan(1), jan(31), 70.0)];
        let load = max_concurrent_allocation(jan(10), jan(12), &existing);
        assert!((load - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn other_freelancers_are_ignored() {
        let mut other = booking("Atlas", jan(1), jan(10), 100.0);
        other.freelancer_id = "f-2".to_string();
        let query = AvailabilityQuery::new("f-1", jan(1), jan(10));
        assert!(check_availability(&query, &[other]).is_available);
    }

    #[test]
    fn fractional_allocations_are_not_rounded() {
        let existing = vec![booking("Atlas", jan(1), jan(10), 33.3)];
        let query = AvailabilityQuery::new("f-1", jan(1), jan(10)).with_allocation(66.8);
        assert!(!check_availability(&query, &existing).is_available);
    }

    #[test]
    fn ranges_overlap_is_symmetric() {
        assert!(ranges_overlap(jan(1), jan(5), jan(5), jan(9)));
        assert!(ranges_overlap(jan(5), jan(9), jan(1), jan(5)));
        assert!(ranges_overlap(jan(1), jan(31), jan(10), jan(11)));
        assert!(!ranges_overlap(jan(1), jan(4), jan(5), jan(9)));
        assert!(!ranges_overlap(jan(5), jan(9), jan(1), jan(4)));
    }
}
