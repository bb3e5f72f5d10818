//! CLI command definitions for the `roster` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `roster assign create`, `roster check`).

pub mod assign;
pub mod check;
pub mod similar;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Book freelancers without overloading them, and search embeddings.
#[derive(Parser)]
#[command(name = "roster", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory (defaults to $ROSTER_DATA_DIR or ~/.roster).
    #[arg(long, global = true, env = "ROSTER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Filter directive implied by `--quiet`/`-v`, if any.
    pub fn level_override(&self) -> Option<&'static str> {
        match self.verbose {
            0 if self.quiet => Some("error"),
            0 => None,
            1 => Some("info,roster_core=debug,roster_infra=debug"),
            _ => Some("trace"),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage assignments (create, list, show, update, delete).
    Assign {
        #[command(subcommand)]
        action: AssignCommand,
    },

    /// Check whether a freelancer can take on a booking.
    Check {
        /// Freelancer identifier.
        #[arg(long)]
        freelancer: String,

        /// First day of the booking (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the booking, inclusive (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Requested allocation in percent (defaults to config, normally 100).
        #[arg(long)]
        allocation: Option<f64>,

        /// Assignment being edited; ignored when computing overlaps.
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Rank corpus items by cosine similarity to a query vector.
    Similar {
        /// JSON file holding `[{ "id": ..., "embedding": [...], "payload": ... }]`.
        #[arg(long)]
        corpus: PathBuf,

        /// Query vector as JSON (`[0.1, 0.2]`) or comma-separated numbers.
        #[arg(long, allow_hyphen_values = true)]
        query: String,

        /// Number of neighbors to return (defaults to config, normally 3).
        #[arg(short)]
        k: Option<usize>,

        /// Drop results scoring below this value.
        #[arg(long, allow_hyphen_values = true)]
        min_score: Option<f64>,
    },

    /// Search an index of source documents.
    Docs {
        #[command(subcommand)]
        action: DocsCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum AssignCommand {
    /// Book a freelancer onto a project.
    Create {
        #[arg(long)]
        freelancer: String,

        #[arg(long)]
        project: String,

        /// Project display title (used in conflict messages).
        #[arg(long)]
        title: String,

        #[arg(long)]
        role: String,

        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,

        #[arg(long)]
        allocation: Option<f64>,

        /// Tentative, Confirmed, or Active (default).
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List assignments.
    #[command(alias = "ls")]
    List {
        /// Only show this freelancer's assignments.
        #[arg(long)]
        freelancer: Option<String>,

        /// Only show this project's assignments.
        #[arg(long)]
        project: Option<String>,
    },

    /// Show one assignment.
    Show { id: String },

    /// Change an assignment. Rescheduling re-runs the availability check.
    Update {
        id: String,

        #[arg(long)]
        freelancer: Option<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        allocation: Option<f64>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an assignment.
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum DocsCommand {
    /// Load a document index and return the closest chunks.
    Search {
        /// JSON file holding an array of documents with embeddings.
        #[arg(long)]
        index: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        query: String,

        #[arg(short)]
        k: Option<usize>,
    },
}

/// Parse a query vector from JSON (`[1, 0.5]`) or a comma-separated list.
pub fn parse_vector(raw: &str) -> anyhow::Result<Vec<f64>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|e| anyhow::anyhow!("invalid vector component '{part}': {e}"))
        })
        .collect()
}
