//! Application state wiring services together.
//!
//! `AssignmentService` is generic over its repository; AppState pins it to
//! the in-memory repository loaded from the data directory's snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use roster_core::service::assignment::AssignmentService;
use roster_infra::filesystem::assignments_path;
use roster_infra::memory::InMemoryAssignmentRepository;
use roster_types::config::RosterConfig;

pub type ConcreteAssignmentService = AssignmentService<InMemoryAssignmentRepository>;

pub struct AppState {
    pub config: RosterConfig,
    pub data_dir: PathBuf,
    pub repo: Arc<InMemoryAssignmentRepository>,
    pub assignment_service: ConcreteAssignmentService,
}

impl AppState {
    /// Ensure the data directory exists and load the assignment snapshot.
    pub async fn init(data_dir: PathBuf, config: RosterConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let repo = Arc::new(
            InMemoryAssignmentRepository::load_snapshot(&assignments_path(&data_dir)).await?,
        );
        let assignment_service = AssignmentService::with_default_allocation(
            Arc::clone(&repo),
            config.availability.default_allocation,
        );

        Ok(Self {
            config,
            data_dir,
            repo,
            assignment_service,
        })
    }

    /// Write the current assignments back to disk.
    pub async fn persist(&self) -> anyhow::Result<()> {
        self.repo
            .save_snapshot(&assignments_path(&self.data_dir))
            .await?;
        Ok(())
    }
}
