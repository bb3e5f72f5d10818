//! Shared domain types for Roster.
//!
//! Assignments (bookings of a freelancer's capacity), availability queries
//! and results, embedding corpus items, configuration, and the error enums
//! used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod assignment;
pub mod availability;
pub mod config;
pub mod error;
pub mod vector;
