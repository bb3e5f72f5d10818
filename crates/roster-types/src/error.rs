use thiserror::Error;

/// Errors from embedding vector math.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    #[error("dimension mismatch: left vector has {left} dimensions, right vector has {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Errors related to assignment (booking) operations.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("assignment not found")]
    NotFound,

    #[error("scheduling conflict: {reason}")]
    Conflict { reason: String },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid allocation {0}: must be between 0 and 100")]
    InvalidAllocation(f64),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in roster-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("vector error: {0}")]
    Vector(#[from] VectorError),

    #[error("io error: {0}")]
    Io(String),
}
