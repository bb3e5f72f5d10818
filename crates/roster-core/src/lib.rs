//! Computational core and repository trait definitions for Roster.
//!
//! `vector` and `availability` are pure, synchronous algorithms. The
//! `repository` module defines the ports that roster-infra implements, and
//! `service` wires the two together. This crate depends only on
//! `roster-types` -- never on `roster-infra` or any IO crate.

pub mod availability;
pub mod repository;
pub mod service;
pub mod vector;
