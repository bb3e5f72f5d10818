//! Document vector store trait.
//!
//! Defines the interface for indexing content chunks with their embeddings
//! and searching them by similarity. Implementations live in roster-infra.

use roster_types::error::RepositoryError;
use roster_types::vector::{RankedDocument, VectorDocument};

/// Trait for an embedding-indexed document store.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait VectorStore: Send + Sync {
    /// Index a single document.
    fn add(
        &self,
        document: VectorDocument,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Index many documents at once.
    fn add_batch(
        &self,
        documents: Vec<VectorDocument>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Return up to `top_k` documents ranked by cosine similarity to the
    /// query, best first. An empty store yields an empty list.
    fn search(
        &self,
        query_embedding: &[f64],
        top_k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RankedDocument>, RepositoryError>> + Send;

    /// Number of indexed documents.
    fn count(&self) -> impl std::future::Future<Output = Result<usize, RepositoryError>> + Send;

    /// Remove every document.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
