//! Storage abstractions for service layer
//!
//! File-backed containers shared by the product and user stores, plus the
//! load/save counters they report.

pub mod json_list_store;
pub mod metrics;

pub use json_list_store::{JsonListStore, LoadOutcome};
