//! Similarity search commands: `roster similar` over a generic corpus file
//! and `roster docs search` over a source-document index.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use serde::Serialize;

use roster_core::vector::store::VectorStore;
use roster_core::vector::{find_nearest_neighbors, find_nearest_neighbors_above};
use roster_infra::config::resolve_search_k;
use roster_infra::memory::InMemoryVectorStore;
use roster_types::config::RosterConfig;
use roster_types::vector::{CorpusItem, VectorDocument};

use super::parse_vector;

#[derive(Serialize)]
struct Hit<'a> {
    id: &'a str,
    score: f64,
    payload: &'a serde_json::Value,
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Rank the items of a corpus file against a query vector.
pub async fn run(
    config: &RosterConfig,
    corpus_path: &Path,
    raw_query: &str,
    k: Option<usize>,
    min_score: Option<f64>,
    json: bool,
) -> Result<()> {
    let query = parse_vector(raw_query)?;
    let corpus: Vec<CorpusItem> = read_json(corpus_path).await?;
    let k = resolve_search_k(config, k);

    let results = match min_score.or(config.search.min_score) {
        Some(min) => find_nearest_neighbors_above(&query, &corpus, k, min)?,
        None => find_nearest_neighbors(&query, &corpus, k)?,
    };

    if json {
        let hits: Vec<Hit<'_>> = results
            .iter()
            .map(|r| Hit {
                id: &r.item.id,
                score: r.score,
                payload: &r.item.payload,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("  No matches.");
        return Ok(());
    }

    let mut table = results_table(&["#", "ID", "Score"]);
    for (rank, r) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&r.item.id).fg(Color::Cyan),
            Cell::new(format!("{:.4}", r.score)),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Load a document index into the vector store and search it.
pub async fn search_docs(
    config: &RosterConfig,
    index_path: &Path,
    raw_query: &str,
    k: Option<usize>,
    json: bool,
) -> Result<()> {
    let query = parse_vector(raw_query)?;
    let documents: Vec<VectorDocument> = read_json(index_path).await?;

    let store = InMemoryVectorStore::new();
    store.add_batch(documents).await?;
    let results = store.search(&query, resolve_search_k(config, k)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("  No matches.");
        return Ok(());
    }

    let mut table = results_table(&["#", "File", "Lines", "Kind", "Score"]);
    for (rank, r) in results.iter().enumerate() {
        let meta = &r.document.metadata;
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&meta.file_path).fg(Color::Cyan),
            Cell::new(format!("{}-{}", meta.line_start, meta.line_end)),
            Cell::new(meta.kind),
            Cell::new(format!("{:.4}", r.score)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn results_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_json_parses_corpus_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("corpus.json");
        tokio::fs::write(
            &path,
            concat!(
                r#"[{"id":"a","embedding":[1,0],"payload":{"name":"Ana"}},"#,
                r#"{"id":"b","embedding":[0,1]}]"#,
            ),
        )
        .await
        .unwrap();

        let corpus: Vec<CorpusItem> = read_json(&path).await.unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].payload["name"], "Ana");

        let ranked = find_nearest_neighbors(&[0.0, 1.0], &corpus, 1).unwrap();
        assert_eq!(ranked[0].item.id, "b");
    }

    #[tokio::test]
    async fn read_json_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_json::<Vec<CorpusItem>>(&tmp.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
