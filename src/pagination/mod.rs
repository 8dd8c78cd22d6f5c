//! Pagination module
//!
//! Page-number pagination that runs until the server returns an empty page.
//!
//! # Overview
//!
//! - `Paginator` - drives one endpoint to exhaustion and returns a `PageRun`
//! - `RequestParams` / `PageCursor` - query parameters and the in-flight cursor
//! - `RequestBag` - per-run metadata, including a log of issued requests
//! - `PreFetchHook` - extension point called before each request
//! - `next_link` - informational `Link: <...>; rel="next"` parsing

mod hooks;
mod link;
mod paginator;
mod types;

pub use hooks::{record_request, PreFetchHook, RecordRequests};
pub use link::{next_link, parse_link_header};
pub use paginator::Paginator;
pub use types::{
    merge_into, PageCursor, PageRun, RequestBag, RequestParams, RequestRecord, MAX_PER_PAGE,
};
