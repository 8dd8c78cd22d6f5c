//! Transport boundary
//!
//! The paginator only ever talks to a [`Transport`]. The crate ships a
//! reqwest implementation ([`super::HttpClient`]); tests and embedders can
//! supply their own.

use crate::error::Result;
use crate::pagination::{next_link, RequestParams};
use crate::types::{Record, StringMap};
use async_trait::async_trait;
use std::sync::Arc;

/// One page as returned by the server
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Items on this page, in server order
    pub body: Vec<Record>,
    /// Response headers, names lower-cased
    pub headers: StringMap,
}

impl Page {
    /// Create a page without headers
    pub fn new(body: Vec<Record>) -> Self {
        Self {
            body,
            headers: StringMap::new(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Whether this is the terminal page
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// `rel="next"` URL from the `Link` header, if the server sent one
    pub fn next_link(&self) -> Option<String> {
        self.headers.get("link").and_then(|link| next_link(link))
    }
}

/// Fetches one page of a collection endpoint
///
/// Implementations resolve with a (possibly empty) page or fail; the paginator
/// never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with `params` as the query string
    async fn get(&self, url: &str, params: &RequestParams) -> Result<Page>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str, params: &RequestParams) -> Result<Page> {
        (**self).get(url, params).await
    }
}
