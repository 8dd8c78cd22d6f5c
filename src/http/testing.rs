//! In-memory transport for unit tests

use super::transport::{Page, Transport};
use crate::error::{Error, Result};
use crate::pagination::RequestParams;
use crate::types::Record;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Serves scripted pages per URL; page `n` is the `n-1`th entry, anything
/// past the script is an empty page
#[derive(Default)]
pub(crate) struct FakeTransport {
    pages: HashMap<String, Vec<Vec<Record>>>,
    stalled: HashSet<String>,
    failing: HashMap<String, u16>,
    calls: Mutex<Vec<(String, RequestParams)>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script the non-empty pages of `url`
    pub(crate) fn with_pages(mut self, url: &str, pages: Vec<Vec<Record>>) -> Self {
        self.pages.insert(url.to_string(), pages);
        self
    }

    /// Never answer the terminal empty page of `url`
    pub(crate) fn stall(mut self, url: &str) -> Self {
        self.stalled.insert(url.to_string());
        self
    }

    /// Answer every request to `url` with an HTTP error
    pub(crate) fn fail(mut self, url: &str, status: u16) -> Self {
        self.failing.insert(url.to_string(), status);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, RequestParams)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|(u, _)| u == url).count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, params: &RequestParams) -> Result<Page> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.clone()));

        // Let other streams run between request and response
        tokio::task::yield_now().await;

        if let Some(status) = self.failing.get(url) {
            return Err(Error::http_status(*status, "scripted failure"));
        }

        let script = self.pages.get(url).map(Vec::as_slice).unwrap_or_default();
        let index = params.page().saturating_sub(1) as usize;
        match script.get(index) {
            Some(items) => Ok(Page::new(items.clone())),
            None if self.stalled.contains(url) => std::future::pending().await,
            None => Ok(Page::new(Vec::new())),
        }
    }
}
