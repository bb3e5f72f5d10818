//! Availability query and result types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assignment::{Assignment, AssignmentId};

/// Allocation assumed when a caller does not state one.
pub const DEFAULT_REQUESTED_ALLOCATION: f64 = 100.0;

/// Total concurrent allocation a freelancer may carry.
pub const CAPACITY_LIMIT: f64 = 100.0;

/// A proposed booking to test against a freelancer's existing assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub freelancer_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub requested_allocation: f64,
    /// Assignment being edited; it never conflicts with itself.
    pub exclude_assignment_id: Option<AssignmentId>,
}

impl AvailabilityQuery {
    /// Build a query for a full-time (100%) booking.
    pub fn new(
        freelancer_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            freelancer_id: freelancer_id.into(),
            start_date,
            end_date,
            requested_allocation: DEFAULT_REQUESTED_ALLOCATION,
            exclude_assignment_id: None,
        }
    }

    pub fn with_allocation(mut self, allocation: f64) -> Self {
        self.requested_allocation = allocation;
        self
    }

    pub fn excluding(mut self, id: AssignmentId) -> Self {
        self.exclude_assignment_id = Some(id);
        self
    }
}

/// Outcome of an availability check.
///
/// On rejection `reason` carries a human-readable message and
/// `conflicting_assignments` the overlapping bookings that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_assignments: Vec<Assignment>,
}

impl AvailabilityResult {
    pub fn available() -> Self {
        Self {
            is_available: true,
            reason: None,
            conflicting_assignments: Vec::new(),
        }
    }

    pub fn overloaded(reason: String, conflicting_assignments: Vec<Assignment>) -> Self {
        Self {
            is_available: false,
            reason: Some(reason),
            conflicting_assignments,
        }
    }
}
