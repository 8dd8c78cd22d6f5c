//! Fan-out module
//!
//! One paginated stream per parent record, joined into a single result.
//!
//! # Overview
//!
//! Each child stream logs its requests into its own `RequestBag`. When a
//! stream finishes, its logged URLs are matched against the pending set of
//! initial requests; the fan-out completes exactly once, when that set is
//! empty.

mod aggregator;
mod types;

pub use aggregator::FanOutAggregator;
pub use types::{parent_ids, Aggregation, PendingRequests};
