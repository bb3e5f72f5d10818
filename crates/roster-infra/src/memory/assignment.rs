//! `DashMap`-backed implementation of `AssignmentRepository`.
//!
//! Rows live in memory for the lifetime of the process. The CLI loads them
//! from `assignments.json` at startup and writes them back after mutations
//! with [`InMemoryAssignmentRepository::save_snapshot`].

use std::path::Path;

use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};

use roster_core::repository::assignment::{AssignmentFilter, AssignmentRepository};
use roster_types::assignment::{Assignment, AssignmentId};
use roster_types::error::RepositoryError;

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk snapshot layout.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    assignments: Vec<Assignment>,
}

/// Concurrent in-memory assignment store.
///
/// `DashMap` shards its locks, so concurrent readers and writers on
/// different assignments never block each other.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    rows: DashMap<AssignmentId, Assignment>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assignments(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let rows = assignments.into_iter().map(|a| (a.id, a)).collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a snapshot written by [`save_snapshot`](Self::save_snapshot).
    ///
    /// A missing file yields an empty repository.
    pub async fn load_snapshot(path: &Path) -> Result<Self, RepositoryError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(err) => return Err(RepositoryError::Io(format!("{}: {err}", path.display()))),
        };

        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Query(format!("corrupt snapshot {}: {e}", path.display()))
        })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RepositoryError::Query(format!(
                "unsupported snapshot version {} in {}",
                snapshot.version,
                path.display()
            )));
        }

        tracing::debug!(count = snapshot.assignments.len(), "loaded assignment snapshot");
        Ok(Self::from_assignments(snapshot.assignments))
    }

    /// Write all rows to `path`, replacing it atomically via a temp file.
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), RepositoryError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            assignments: self.sorted(|_| true),
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Io(e.to_string()))?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;

        tracing::debug!(
            count = snapshot.assignments.len(),
            path = %path.display(),
            "saved assignment snapshot"
        );
        Ok(())
    }

    /// Matching rows ordered by start date, then id.
    fn sorted(&self, predicate: impl Fn(&Assignment) -> bool) -> Vec<Assignment> {
        let mut rows: Vec<Assignment> = self
            .rows
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.0.cmp(&b.id.0)));
        rows
    }
}

impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn create(&self, assignment: &Assignment) -> Result<Assignment, RepositoryError> {
        match self.rows.entry(assignment.id) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "assignment {} already exists",
                assignment.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(assignment.clone());
                Ok(assignment.clone())
            }
        }
    }

    async fn get_by_id(&self, id: &AssignmentId) -> Result<Option<Assignment>, RepositoryError> {
        Ok(self.rows.get(id).map(|entry| entry.value().clone()))
    }

    async fn list(
        &self,
        filter: Option<AssignmentFilter>,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        Ok(self.sorted(|a| filter.matches(a)))
    }

    async fn update(&self, assignment: &Assignment) -> Result<Assignment, RepositoryError> {
        let mut entry = self.rows.get_mut(&assignment.id).ok_or(RepositoryError::NotFound)?;
        *entry = assignment.clone();
        Ok(assignment.clone())
    }

    async fn delete(&self, id: &AssignmentId) -> Result<Assignment, RepositoryError> {
        self.rows
            .remove(id)
            .map(|(_, assignment)| assignment)
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_overlapping(
        &self,
        freelancer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&AssignmentId>,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        Ok(self.sorted(|a| {
            a.freelancer_id == freelancer_id
                && exclude_id != Some(&a.id)
                && a.start_date <= end
                && a.end_date >= start
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roster_types::assignment::AssignmentStatus;
    use tempfile::TempDir;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn booking(freelancer: &str, start: NaiveDate, end: NaiveDate) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: AssignmentId::new(),
            freelancer_id: freelancer.to_string(),
            project_id: "p-1".to_string(),
            project_title: "Atlas".to_string(),
            role: "Editor".to_string(),
            start_date: start,
            end_date: end,
            allocation: 50.0,
            status: AssignmentStatus::Confirmed,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repo = InMemoryAssignmentRepository::new();
        let a = booking("ana", jan(1), jan(5));
        repo.create(&a).await.unwrap();
        assert!(matches!(
            repo.create(&a).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_overlapping_uses_inclusive_bounds() {
        let repo = InMemoryAssignmentRepository::new();
        let early = booking("ana", jan(1), jan(5));
        let late = booking("ana", jan(10), jan(15));
        let other = booking("ben", jan(1), jan(31));
        for a in [&early, &late, &other] {
            repo.create(a).await.unwrap();
        }

        let hits = repo.find_overlapping("ana", jan(5), jan(10), None).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, early.id);
        assert_eq!(hits[1].id, late.id);

        let hits = repo.find_overlapping("ana", jan(6), jan(9), None).await.unwrap();
        assert!(hits.is_empty());

        let hits = repo
            .find_overlapping("ana", jan(1), jan(31), Some(&early.id))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, late.id);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryAssignmentRepository::new();
        let mut a = booking("ana", jan(1), jan(5));
        repo.create(&a).await.unwrap();

        a.allocation = 75.0;
        repo.update(&a).await.unwrap();
        let stored = repo.get_by_id(&a.id).await.unwrap().unwrap();
        assert!((stored.allocation - 75.0).abs() < f64::EPSILON);

        let removed = repo.delete(&a.id).await.unwrap();
        assert_eq!(removed.id, a.id);
        assert!(repo.is_empty());
        assert!(matches!(repo.delete(&a.id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.update(&a).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_start_date() {
        let repo = InMemoryAssignmentRepository::new();
        repo.create(&booking("ana", jan(20), jan(25))).await.unwrap();
        repo.create(&booking("ana", jan(1), jan(5))).await.unwrap();
        repo.create(&booking("ben", jan(10), jan(12))).await.unwrap();

        let all = repo.list(None).await.unwrap();
        let starts: Vec<_> = all.iter().map(|a| a.start_date).collect();
        assert_eq!(starts, vec![jan(1), jan(10), jan(20)]);

        let ana = repo
            .list(Some(AssignmentFilter {
                freelancer_id: Some("ana".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(ana.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("assignments.json");

        let repo = InMemoryAssignmentRepository::new();
        let a = booking("ana", jan(1), jan(5));
        repo.create(&a).await.unwrap();
        repo.save_snapshot(&path).await.unwrap();

        let loaded = InMemoryAssignmentRepository::load_snapshot(&path).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get_by_id(&a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_load_missing_snapshot_is_empty() {
        let tmp = TempDir::new().unwrap();
        let repo = InMemoryAssignmentRepository::load_snapshot(&tmp.path().join("none.json"))
            .await
            .unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_snapshot_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("assignments.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        assert!(matches!(
            InMemoryAssignmentRepository::load_snapshot(&path).await,
            Err(RepositoryError::Query(_))
        ));
    }
}
