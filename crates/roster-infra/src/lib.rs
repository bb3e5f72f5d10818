//! Infrastructure layer for Roster.
//!
//! Contains implementations of the repository traits defined in
//! `roster-core`: a `DashMap`-backed assignment repository with JSON
//! snapshot persistence, an in-memory document vector store, and the
//! `config.toml` loader.

pub mod config;
pub mod filesystem;
pub mod memory;
