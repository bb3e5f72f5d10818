//! In-memory adapters.

pub mod assignment;
pub mod vector;

pub use assignment::InMemoryAssignmentRepository;
pub use vector::InMemoryVectorStore;
