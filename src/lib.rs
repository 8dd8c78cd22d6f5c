//! # gitlab-harvest
//!
//! Exhaustive pagination and per-project fan-out over the GitLab v3 REST API.
//!
//! ## Features
//!
//! - **Page-number pagination**: fetch pages until the server returns an empty one
//! - **Request logging**: every run can log its requests into a per-stream bag
//! - **Fan-out**: one stream per project, joined into a single merge request list
//! - **Pluggable transport**: reqwest by default, anything implementing `Transport`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gitlab_harvest::{Credentials, FanOutAggregator, HttpClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = Credentials::new("https://gitlab.example.com", "glpat-xxxx");
//!     let aggregator = FanOutAggregator::new(HttpClient::new()?, credentials);
//!
//!     let merge_requests = aggregator.run_all().await?;
//!     println!("{} merge requests", merge_requests.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     FanOutAggregator                      │
//! │  get_parents() → projects    start_child_fetches() → MRs  │
//! └───────────────────────────────────────────────────────────┘
//!               │                              │
//! ┌─────────────┴─────────────┐  ┌─────────────┴─────────────┐
//! │        Paginator          │  │       Aggregation         │
//! │ cursor, hook, RequestBag  │  │ pending set, fire once    │
//! └─────────────┬─────────────┘  └───────────────────────────┘
//!               │
//! ┌─────────────┴─────────────┐
//! │   Transport / HttpClient  │
//! └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Transport trait and reqwest client
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Project / merge request fan-out
pub mod fanout;

/// GitLab v3 endpoint URLs and parameters
pub mod endpoints;

/// Credentials and harvest configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{Credentials, HarvestConfig};
pub use fanout::FanOutAggregator;
pub use http::{HttpClient, HttpClientConfig, Page, Transport};
pub use pagination::{PageRun, Paginator, RequestBag, RequestParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
