//! Exhaustive page-number paginator
//!
//! Drives one endpoint from its starting page until the server answers with
//! an empty page, merging every page into a single accumulator.

use super::hooks::PreFetchHook;
use super::types::{merge_into, PageRun, RequestBag, RequestParams};
use crate::error::Result;
use crate::http::Transport;
use crate::types::Record;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    Fetching,
    Done,
}

/// One paginated run over a single endpoint
///
/// The run owns its params, accumulator and bag until [`Paginator::fetch_all`]
/// hands them back in a [`PageRun`].
pub struct Paginator<'a, T: Transport + ?Sized> {
    transport: &'a T,
    url: String,
    params: RequestParams,
    accumulator: Vec<Record>,
    bag: Option<RequestBag>,
    hook: Option<Box<dyn PreFetchHook + 'a>>,
}

impl<'a, T: Transport + ?Sized> Paginator<'a, T> {
    /// Create a run starting at `params.cursor`
    pub fn new(transport: &'a T, url: impl Into<String>, params: RequestParams) -> Self {
        Self {
            transport,
            url: url.into(),
            params,
            accumulator: Vec::new(),
            bag: None,
            hook: None,
        }
    }

    /// Start from an existing accumulator instead of an empty one
    #[must_use]
    pub fn with_accumulator(mut self, accumulator: Vec<Record>) -> Self {
        self.accumulator = accumulator;
        self
    }

    /// Thread a bag through the run
    #[must_use]
    pub fn with_bag(mut self, bag: RequestBag) -> Self {
        self.bag = Some(bag);
        self
    }

    /// Invoke `hook` before every page request
    #[must_use]
    pub fn with_hook(mut self, hook: impl PreFetchHook + 'a) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Endpoint URL of this run
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch pages until one comes back empty
    ///
    /// A transport error ends the run and is returned as-is; items merged
    /// before the failure are dropped with it.
    pub async fn fetch_all(mut self) -> Result<PageRun> {
        if !self.params.cursor.is_valid() {
            warn!(
                url = %self.url,
                page = self.params.cursor.page,
                per_page = self.params.cursor.per_page,
                "paginator started with an invalid cursor; page must be >= 1 and per_page > 0"
            );
        }

        let mut pages = 0;
        let mut state = FetchState::Fetching;

        while state == FetchState::Fetching {
            if let Some(hook) = &self.hook {
                hook.before_fetch(&self.url, &self.params, &self.accumulator, self.bag.as_mut());
            }

            let requested = self.params.page();
            let page = self.transport.get(&self.url, &self.params).await?;
            debug!(url = %self.url, page = requested, count = page.body.len(), "fetched page");

            state = self.step(page.body);
            if state == FetchState::Fetching {
                pages += 1;
            }
        }

        debug!(
            url = %self.url,
            pages,
            records = self.accumulator.len(),
            "pagination exhausted"
        );

        Ok(PageRun {
            records: self.accumulator,
            params: self.params,
            bag: self.bag,
            pages,
        })
    }

    /// Apply one page: merge and advance, or finish on an empty page
    fn step(&mut self, items: Vec<Record>) -> FetchState {
        if items.is_empty() {
            return FetchState::Done;
        }
        merge_into(&mut self.accumulator, items);
        self.params.cursor.advance();
        FetchState::Fetching
    }
}
