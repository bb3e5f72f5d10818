//! Embedding similarity: cosine similarity, top-K nearest-neighbor scan,
//! and the document vector store port.

pub mod neighbors;
pub mod similarity;
pub mod store;

pub use neighbors::{Embedded, ScoredItem, find_nearest_neighbors, find_nearest_neighbors_above};
pub use similarity::cosine_similarity;
