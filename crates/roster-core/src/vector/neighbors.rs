//! Linear-scan nearest-neighbor search.
//!
//! Scores every corpus item against the query and keeps the top `k`. This is
//! an exact O(N·D) scan meant for small corpora (re-ranking, < 10,000 items),
//! not an approximate index.

use std::cmp::Ordering;

use roster_types::error::VectorError;
use roster_types::vector::{CorpusItem, VectorDocument};

use super::similarity::cosine_similarity;

/// Anything carrying an identifier and an embedding can be searched.
pub trait Embedded {
    fn id(&self) -> &str;
    fn embedding(&self) -> &[f64];
}

impl<P> Embedded for CorpusItem<P> {
    fn id(&self) -> &str {
        &self.id
    }

    fn embedding(&self) -> &[f64] {
        &self.embedding
    }
}

impl Embedded for VectorDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn embedding(&self) -> &[f64] {
        &self.embedding
    }
}

/// A corpus item paired with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem<'a, T> {
    pub item: &'a T,
    pub score: f64,
}

/// Return the `k` corpus items most similar to `query`, best first.
///
/// Ties keep their original corpus order. Returns fewer than `k` items when
/// the corpus is smaller, and nothing for `k == 0` or an empty corpus.
///
/// # Errors
///
/// [`VectorError::DimensionMismatch`] if any item's embedding length differs
/// from the query's. No partial results are returned.
pub fn find_nearest_neighbors<'a, T: Embedded>(
    query: &[f64],
    corpus: &'a [T],
    k: usize,
) -> Result<Vec<ScoredItem<'a, T>>, VectorError> {
    rank(query, corpus, k, None)
}

/// Like [`find_nearest_neighbors`], but drops items scoring below
/// `min_score` before taking the top `k`.
pub fn find_nearest_neighbors_above<'a, T: Embedded>(
    query: &[f64],
    corpus: &'a [T],
    k: usize,
    min_score: f64,
) -> Result<Vec<ScoredItem<'a, T>>, VectorError> {
    rank(query, corpus, k, Some(min_score))
}

fn rank<'a, T: Embedded>(
    query: &[f64],
    corpus: &'a [T],
    k: usize,
    min_score: Option<f64>,
) -> Result<Vec<ScoredItem<'a, T>>, VectorError> {
    if k == 0 || corpus.is_empty() {
        return Ok(Vec::new());
    }

    let mut scored = corpus
        .iter()
        .map(|item| {
            cosine_similarity(query, item.embedding()).map(|score| ScoredItem { item, score })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(min) = min_score {
        scored.retain(|s| s.score >= min);
    }

    // sort_by is stable; -0.0 and 0.0 compare equal under partial_cmp.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);

    tracing::debug!(
        corpus_size = corpus.len(),
        returned = scored.len(),
        "nearest neighbor scan complete"
    );
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, embedding: &[f64]) -> CorpusItem<()> {
        CorpusItem::new(id, embedding.to_vec(), ())
    }

    fn ids<T: Embedded>(results: &[ScoredItem<'_, T>]) -> Vec<String> {
        results.iter().map(|s| s.item.id().to_string()).collect()
    }

    #[test]
    fn ties_keep_corpus_order() {
        let corpus = vec![item("a", &[1.0, 0.0]), item("b", &[0.0, 1.0]), item("c", &[1.0, 0.0])];

        let top2 = find_nearest_neighbors(&[1.0, 0.0], &corpus, 2).unwrap();
        assert_eq!(ids(&top2), vec!["a", "c"]);
        assert!((top2[0].score - 1.0).abs() < 1e-9);
        assert!((top2[1].score - 1.0).abs() < 1e-9);

        let all = find_nearest_neighbors(&[1.0, 0.0], &corpus, 3).unwrap();
        assert_eq!(ids(&all), vec!["a", "c", "b"]);
        assert!(all[2].score.abs() < 1e-9);
    }

    #[test]
    fn results_sorted_descending() {
        let corpus = vec![
            item("far", &[-1.0, 0.2]),
            item("near", &[0.9, 0.1]),
            item("mid", &[0.5, 0.5]),
            item("side", &[0.0, 1.0]),
        ];
        let results = find_nearest_neighbors(&[1.0, 0.0], &corpus, 10).unwrap();
        assert_eq!(ids(&results), vec!["near", "mid", "side", "far"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn length_is_min_of_k_and_corpus() {
        let corpus = vec![item("a", &[1.0]), item("b", &[2.0]), item("c", &[-1.0])];
        assert_eq!(find_nearest_neighbors(&[1.0], &corpus, 2).unwrap().len(), 2);
        assert_eq!(find_nearest_neighbors(&[1.0], &corpus, 3).unwrap().len(), 3);
        assert_eq!(find_nearest_neighbors(&[1.0], &corpus, 50).unwrap().len(), 3);
    }

    #[test]
    fn zero_k_returns_empty() {
        let corpus = vec![item("a", &[1.0, 0.0])];
        assert!(find_nearest_neighbors(&[1.0, 0.0], &corpus, 0).unwrap().is_empty());
    }

    #[test]
    fn empty_corpus_returns_empty() {
        let corpus: Vec<CorpusItem<()>> = Vec::new();
        assert!(find_nearest_neighbors(&[1.0, 0.0], &corpus, 5).unwrap().is_empty());
    }

    #[test]
    fn mismatched_item_fails_whole_scan() {
        let corpus = vec![item("a", &[1.0, 0.0]), item("bad", &[1.0, 0.0, 0.0])];
        let err = find_nearest_neighbors(&[1.0, 0.0], &corpus, 1).unwrap_err();
        assert_eq!(err, VectorError::DimensionMismatch { left: 2, right: 3 });
    }

    #[test]
    fn min_score_filters_before_truncation() {
        let corpus = vec![
            item("a", &[1.0, 0.0]),
            item("b", &[0.0, 1.0]),
            item("c", &[-1.0, 0.0]),
        ];
        let results = find_nearest_neighbors_above(&[1.0, 0.0], &corpus, 3, 0.5).unwrap();
        assert_eq!(ids(&results), vec!["a"]);
    }

    #[test]
    fn zero_embedding_ranks_as_zero_score() {
        let corpus = vec![item("zero", &[0.0, 0.0]), item("neg", &[-1.0, 0.0])];
        let results = find_nearest_neighbors(&[1.0, 0.0], &corpus, 2).unwrap();
        assert_eq!(ids(&results), vec!["zero", "neg"]);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn extreme_magnitudes_rank_by_direction() {
        let corpus = vec![
            item("tiny", &[1e-200, -1e-200]),
            item("big", &[1e200, 1e200]),
            item("plain", &[1.0, 0.0]),
        ];
        let results = find_nearest_neighbors(&[1.0, 1.0], &corpus, 3).unwrap();
        assert_eq!(ids(&results), vec!["big", "plain", "tiny"]);
        assert!(results.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }
}
