//! Availability service.
//!
//! Fetches a freelancer's overlapping bookings through the repository and
//! hands them to the pure checker. Persisting the new booking afterwards is
//! the caller's job; two concurrent check-then-write sequences can both pass
//! unless the repository serializes the writes.

use std::sync::Arc;

use chrono::NaiveDate;
use roster_types::availability::{AvailabilityQuery, AvailabilityResult, CAPACITY_LIMIT};
use roster_types::error::AssignmentError;

use crate::availability::check_availability;
use crate::repository::assignment::AssignmentRepository;

pub struct AvailabilityService<R: AssignmentRepository> {
    repo: Arc<R>,
}

impl<R: AssignmentRepository> AvailabilityService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Check whether the freelancer can take the booking described by `query`.
    ///
    /// Rejects a reversed window and an allocation outside `0..=100` (NaN
    /// included) before touching the repository.
    pub async fn check_conflicts(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, AssignmentError> {
        validate(query.start_date, query.end_date, query.requested_allocation)?;

        let candidates = self
            .repo
            .find_overlapping(
                &query.freelancer_id,
                query.start_date,
                query.end_date,
                query.exclude_assignment_id.as_ref(),
            )
            .await
            .map_err(|e| AssignmentError::StorageError(e.to_string()))?;

        Ok(check_availability(query, &candidates))
    }
}

/// Input checks the pure checker assumes have already happened.
fn validate(
    start: NaiveDate,
    end: NaiveDate,
    allocation: f64,
) -> Result<(), AssignmentError> {
    if start > end {
        return Err(AssignmentError::InvalidRange { start, end });
    }
    if !(0.0..=CAPACITY_LIMIT).contains(&allocation) {
        return Err(AssignmentError::InvalidAllocation(allocation));
    }
    Ok(())
}

impl<R: AssignmentRepository> Clone for AvailabilityService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}
