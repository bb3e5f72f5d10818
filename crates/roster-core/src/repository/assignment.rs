//! Assignment repository trait definition.

use chrono::NaiveDate;
use roster_types::assignment::{Assignment, AssignmentId};
use roster_types::error::RepositoryError;

/// Filter criteria for listing assignments.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub freelancer_id: Option<String>,
    pub project_id: Option<String>,
}

impl AssignmentFilter {
    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.freelancer_id
            .as_deref()
            .is_none_or(|f| f == assignment.freelancer_id)
            && self
                .project_id
                .as_deref()
                .is_none_or(|p| p == assignment.project_id)
    }
}

/// Repository trait for assignment persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait AssignmentRepository: Send + Sync {
    /// Store a new assignment. Returns the stored assignment.
    fn create(
        &self,
        assignment: &Assignment,
    ) -> impl std::future::Future<Output = Result<Assignment, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &AssignmentId,
    ) -> impl std::future::Future<Output = Result<Option<Assignment>, RepositoryError>> + Send;

    /// List assignments ordered by start date, then id.
    fn list(
        &self,
        filter: Option<AssignmentFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Assignment>, RepositoryError>> + Send;

    /// Replace an existing assignment. `NotFound` if it does not exist.
    fn update(
        &self,
        assignment: &Assignment,
    ) -> impl std::future::Future<Output = Result<Assignment, RepositoryError>> + Send;

    /// Delete an assignment, returning what was removed.
    fn delete(
        &self,
        id: &AssignmentId,
    ) -> impl std::future::Future<Output = Result<Assignment, RepositoryError>> + Send;

    /// The freelancer's assignments whose inclusive range overlaps
    /// `[start, end]` (`a.start <= end && a.end >= start`), minus `exclude_id`.
    fn find_overlapping(
        &self,
        freelancer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&AssignmentId>,
    ) -> impl std::future::Future<Output = Result<Vec<Assignment>, RepositoryError>> + Send;
}
