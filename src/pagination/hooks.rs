//! Pre-fetch hooks
//!
//! A hook runs before every page request of a paginator run. It sees the
//! params immutably, so it can never move the cursor.

use super::types::{RequestBag, RequestParams};
use crate::types::Record;

/// Extension point invoked before each page request
pub trait PreFetchHook: Send + Sync {
    /// Called with the URL and params about to be requested, the items
    /// accumulated so far and the run's bag
    fn before_fetch(
        &self,
        url: &str,
        params: &RequestParams,
        accumulator: &[Record],
        bag: Option<&mut RequestBag>,
    );
}

impl<F> PreFetchHook for F
where
    F: Fn(&str, &RequestParams, &[Record], Option<&mut RequestBag>) + Send + Sync,
{
    fn before_fetch(
        &self,
        url: &str,
        params: &RequestParams,
        accumulator: &[Record],
        bag: Option<&mut RequestBag>,
    ) {
        self(url, params, accumulator, bag);
    }
}

/// Append `{url, params}` to the bag's request log
///
/// Does nothing when there is no bag or the bag keeps no log.
pub fn record_request(url: &str, params: &RequestParams, bag: Option<&mut RequestBag>) {
    if let Some(bag) = bag {
        bag.record(url, params);
    }
}

/// Hook that logs every issued request into the run's bag
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordRequests;

impl PreFetchHook for RecordRequests {
    fn before_fetch(
        &self,
        url: &str,
        params: &RequestParams,
        _accumulator: &[Record],
        bag: Option<&mut RequestBag>,
    ) {
        record_request(url, params, bag);
    }
}
