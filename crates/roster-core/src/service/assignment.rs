//! Assignment management service.
//!
//! Creating or rescheduling a booking runs the availability check first and
//! refuses the write when the freelancer would be overloaded.

use std::sync::Arc;

use chrono::Utc;
use roster_types::assignment::{
    Assignment, AssignmentId, AssignmentStatus, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use roster_types::availability::{AvailabilityQuery, DEFAULT_REQUESTED_ALLOCATION};
use roster_types::error::{AssignmentError, RepositoryError};

use crate::repository::assignment::{AssignmentFilter, AssignmentRepository};
use crate::service::availability::AvailabilityService;

/// Service orchestrating the booking lifecycle.
///
/// Generic over the repository trait so roster-core never depends on
/// roster-infra.
pub struct AssignmentService<R: AssignmentRepository> {
    repo: Arc<R>,
    availability: AvailabilityService<R>,
    default_allocation: f64,
}

impl<R: AssignmentRepository> AssignmentService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_default_allocation(repo, DEFAULT_REQUESTED_ALLOCATION)
    }

    /// Use `default_allocation` for requests that omit one.
    pub fn with_default_allocation(repo: Arc<R>, default_allocation: f64) -> Self {
        Self {
            availability: AvailabilityService::new(Arc::clone(&repo)),
            repo,
            default_allocation,
        }
    }

    pub fn availability(&self) -> &AvailabilityService<R> {
        &self.availability
    }

    /// Book a freelancer onto a project.
    ///
    /// Fails with [`AssignmentError::Conflict`] when the booking would push
    /// the freelancer's concurrent allocation above 100%.
    /// Invalid ranges and allocations surface as
    /// [`AssignmentError::InvalidRange`] and
    /// [`AssignmentError::InvalidAllocation`] from the availability check.
    pub async fn create(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<Assignment, AssignmentError> {
        let allocation = request.allocation.unwrap_or(self.default_allocation);
        let query =
            AvailabilityQuery::new(&request.freelancer_id, request.start_date, request.end_date)
                .with_allocation(allocation);
        self.ensure_available(&query).await?;

        let now = Utc::now();
        let assignment = Assignment {
            id: AssignmentId::new(),
            freelancer_id: request.freelancer_id,
            project_id: request.project_id,
            project_title: request.project_title,
            role: request.role,
            start_date: request.start_date,
            end_date: request.end_date,
            allocation,
            status: AssignmentStatus::normalize(request.status.as_deref()),
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(&assignment).await.map_err(storage_error)?;
        tracing::info!(
            id = %created.id,
            freelancer_id = %created.freelancer_id,
            allocation = created.allocation,
            "assignment created"
        );
        Ok(created)
    }

    /// Apply a partial update.
    ///
    /// Rescheduling (freelancer, dates, or allocation) re-runs the
    /// availability check with the edited booking excluded from the overlap
    /// set.
    pub async fn update(
        &self,
        id: &AssignmentId,
        request: UpdateAssignmentRequest,
    ) -> Result<Assignment, AssignmentError> {
        let mut assignment = self.get(id).await?;

        let reschedules = request.freelancer_id.is_some()
            || request.start_date.is_some()
            || request.end_date.is_some()
            || request.allocation.is_some();

        if let Some(freelancer_id) = request.freelancer_id {
            assignment.freelancer_id = freelancer_id;
        }
        if let Some(project_id) = request.project_id {
            assignment.project_id = project_id;
        }
        if let Some(project_title) = request.project_title {
            assignment.project_title = project_title;
        }
        if let Some(role) = request.role {
            assignment.role = role;
        }
        if let Some(start_date) = request.start_date {
            assignment.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            assignment.end_date = end_date;
        }
        if let Some(allocation) = request.allocation {
            assignment.allocation = allocation;
        }
        if let Some(status) = request.status.as_deref().filter(|s| !s.is_empty()) {
            assignment.status = AssignmentStatus::normalize(Some(status));
        }
        if request.notes.is_some() {
            assignment.notes = request.notes;
        }

        if reschedules {
            let query = AvailabilityQuery::new(
                &assignment.freelancer_id,
                assignment.start_date,
                assignment.end_date,
            )
            .with_allocation(assignment.allocation)
            .excluding(assignment.id);
            self.ensure_available(&query).await?;
        }

        assignment.updated_at = Utc::now();
        let updated = self.repo.update(&assignment).await.map_err(storage_error)?;
        tracing::info!(id = %updated.id, rescheduled = reschedules, "assignment updated");
        Ok(updated)
    }

    /// Remove a booking, returning what was removed.
    pub async fn delete(&self, id: &AssignmentId) -> Result<Assignment, AssignmentError> {
        let removed = self.repo.delete(id).await.map_err(storage_error)?;
        tracing::info!(id = %removed.id, "assignment deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: &AssignmentId) -> Result<Assignment, AssignmentError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(AssignmentError::NotFound)
    }

    pub async fn list(
        &self,
        filter: Option<AssignmentFilter>,
    ) -> Result<Vec<Assignment>, AssignmentError> {
        self.repo.list(filter).await.map_err(storage_error)
    }

    async fn ensure_available(&self, query: &AvailabilityQuery) -> Result<(), AssignmentError> {
        let result = self.availability.check_conflicts(query).await?;
        if result.is_available {
            return Ok(());
        }
        Err(AssignmentError::Conflict {
            reason: result
                .reason
                .unwrap_or_else(|| "freelancer is not available".to_string()),
        })
    }
}

fn storage_error(err: RepositoryError) -> AssignmentError {
    match err {
        RepositoryError::NotFound => AssignmentError::NotFound,
        other => AssignmentError::StorageError(other.to_string()),
    }
}
