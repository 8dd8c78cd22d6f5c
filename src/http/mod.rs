//! HTTP module
//!
//! The transport boundary used by the paginator, plus the default
//! reqwest-based implementation.
//!
//! # Features
//!
//! - **Transport trait**: `get(url, params) -> Page`, injectable for tests
//! - **JSON array decoding**: non-array bodies are decode errors
//! - **Headers kept**: lower-cased, so `Page::next_link` can read `Link`

mod client;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{Page, Transport};

#[cfg(test)]
mod tests;
