//! In-memory document vector store.
//!
//! Keeps every document in a `Vec` behind an async `RwLock` and answers
//! searches with an exact linear scan. Suitable for re-ranking and small
//! corpora; there is no approximate index.

use tokio::sync::RwLock;

use roster_core::vector::find_nearest_neighbors;
use roster_core::vector::store::VectorStore;
use roster_types::error::RepositoryError;
use roster_types::vector::{RankedDocument, VectorDocument};

#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    documents: RwLock<Vec<VectorDocument>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorStore for InMemoryVectorStore {
    async fn add(&self, document: VectorDocument) -> Result<(), RepositoryError> {
        self.documents.write().await.push(document);
        Ok(())
    }

    async fn add_batch(&self, documents: Vec<VectorDocument>) -> Result<(), RepositoryError> {
        let added = documents.len();
        let mut guard = self.documents.write().await;
        guard.extend(documents);
        tracing::info!(added, total = guard.len(), "added documents to vector store");
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f64],
        top_k: usize,
    ) -> Result<Vec<RankedDocument>, RepositoryError> {
        let guard = self.documents.read().await;
        let ranked = find_nearest_neighbors(query_embedding, guard.as_slice(), top_k)?
            .into_iter()
            .map(|scored| RankedDocument {
                document: scored.item.clone(),
                score: scored.score,
            })
            .collect();
        Ok(ranked)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.documents.read().await.len())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.documents.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::error::VectorError;
    use roster_types::vector::{DocumentKind, DocumentMetadata};

    fn doc(id: &str, embedding: &[f64], kind: DocumentKind) -> VectorDocument {
        VectorDocument {
            id: id.to_string(),
            content: format!("content of {id}"),
            embedding: embedding.to_vec(),
            metadata: DocumentMetadata {
                file_path: format!("src/{id}.ts"),
                line_start: 1,
                line_end: 40,
                kind,
            },
        }
    }

    #[tokio::test]
    async fn test_search_empty_store_returns_empty() {
        let store = InMemoryVectorStore::new();
        assert!(store.search(&[1.0, 0.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let store = InMemoryVectorStore::new();
        store.add(doc("controller", &[0.0, 1.0], DocumentKind::Controller)).await.unwrap();
        store
            .add_batch(vec![
                doc("service", &[1.0, 0.1], DocumentKind::Service),
                doc("schema", &[-1.0, 0.0], DocumentKind::Schema),
            ])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 3);

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["service", "controller"]);
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_search_dimension_mismatch_surfaces() {
        let store = InMemoryVectorStore::new();
        store.add(doc("a", &[1.0, 0.0, 0.0], DocumentKind::Config)).await.unwrap();
        let err = store.search(&[1.0, 0.0], 1).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Vector(VectorError::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let store = InMemoryVectorStore::new();
        store.add(doc("a", &[1.0], DocumentKind::Component)).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
