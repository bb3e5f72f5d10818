//! Embedding corpus types.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A searchable item: an identifier, its embedding, and an opaque payload
/// owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusItem<P = serde_json::Value> {
    pub id: String,
    pub embedding: Vec<f64>,
    #[serde(default)]
    pub payload: P,
}

impl<P> CorpusItem<P> {
    pub fn new(id: impl Into<String>, embedding: Vec<f64>, payload: P) -> Self {
        Self {
            id: id.into(),
            embedding,
            payload,
        }
    }
}

/// A code or content chunk indexed in the document vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f64>,
    pub metadata: DocumentMetadata,
}

/// Source location of a [`VectorDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub line_start: u32,
    pub line_end: u32,
    pub kind: DocumentKind,
}

/// A document with its similarity to a search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub document: VectorDocument,
    pub score: f64,
}

/// What kind of source a document chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Component,
    Service,
    Controller,
    Schema,
    Config,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Component => write!(f, "component"),
            DocumentKind::Service => write!(f, "service"),
            DocumentKind::Controller => write!(f, "controller"),
            DocumentKind::Schema => write!(f, "schema"),
            DocumentKind::Config => write!(f, "config"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "component" => Ok(DocumentKind::Component),
            "service" => Ok(DocumentKind::Service),
            "controller" => Ok(DocumentKind::Controller),
            "schema" => Ok(DocumentKind::Schema),
            "config" => Ok(DocumentKind::Config),
            other => Err(format!("invalid document kind: '{other}'")),
        }
    }
}
