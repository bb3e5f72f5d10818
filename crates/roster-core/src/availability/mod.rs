//! Freelancer availability: does a proposed booking push concurrent
//! allocation above 100% on any day?

pub mod checker;

pub use checker::{check_availability, max_concurrent_allocation, ranges_overlap};
