//! Per-project fan-out over merge request listings
//!
//! Fetches every project, starts one exhaustive paginator run per project and
//! completes once every run has been reconciled against the pending set.

use super::types::{parent_ids, Aggregation};
use crate::config::Credentials;
use crate::endpoints;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::pagination::{Paginator, RecordRequests, RequestBag, RequestRecord, MAX_PER_PAGE};
use crate::types::{Record, StateFilter};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the project → merge request fan-out
///
/// All child streams are polled on the calling task; they interleave at
/// request boundaries but never run in parallel, so reconciliation needs no
/// locking.
pub struct FanOutAggregator<T: Transport> {
    transport: T,
    credentials: Credentials,
    per_page: u32,
    state: StateFilter,
    parent_key: String,
}

impl<T: Transport> FanOutAggregator<T> {
    /// Create an aggregator with page size 100 and `state=all`
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            per_page: MAX_PER_PAGE,
            state: StateFilter::All,
            parent_key: "id".to_string(),
        }
    }

    /// Set the page size used for every request
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the merge request state filter
    #[must_use]
    pub fn with_state(mut self, state: StateFilter) -> Self {
        self.state = state;
        self
    }

    /// Set the parent field holding the project id
    #[must_use]
    pub fn with_parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = key.into();
        self
    }

    /// Transport in use
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every project
    pub async fn get_parents(&self) -> Result<Vec<Record>> {
        let url = endpoints::project_url(&self.credentials.host);
        let params = endpoints::base_params(&self.credentials.private_token, 1, self.per_page);

        let run = Paginator::new(&self.transport, url, params).fetch_all().await?;
        info!(
            projects = run.records.len(),
            pages = run.pages,
            "fetched parent collection"
        );
        Ok(run.records)
    }

    /// Fetch the merge requests of every parent and merge them
    ///
    /// Completes when the pending set drains. If a child request never
    /// resolves this never completes; there is no timeout here.
    pub async fn start_child_fetches(&self, parents: &[Record]) -> Result<Vec<Record>> {
        let start = Instant::now();
        let mut aggregation = Aggregation::new();
        let mut streams = FuturesUnordered::new();

        for id in parent_ids(parents, &self.parent_key) {
            let url = endpoints::merge_request_url(&self.credentials.host, &id);
            let params = endpoints::merge_request_params_with_state(
                &self.credentials.private_token,
                1,
                self.per_page,
                self.state,
            );
            aggregation.register(RequestRecord::new(&url, params.clone()));

            let paginator = Paginator::new(&self.transport, url.clone(), params)
                .with_bag(RequestBag::new().with_field("parent_id", id))
                .with_hook(RecordRequests);
            streams.push(async move { (url, paginator.fetch_all().await) });
        }

        info!(streams = streams.len(), "started child streams");

        if aggregation.fire_if_drained() {
            return Ok(aggregation.into_results());
        }

        while let Some((url, outcome)) = streams.next().await {
            let run = outcome.map_err(|e| {
                warn!(url = %url, error = %e, "child stream failed");
                e
            })?;
            debug!(
                url = %url,
                records = run.records.len(),
                pages = run.pages,
                "child stream exhausted"
            );

            if aggregation.on_child_complete(run.records, run.bag.as_ref()) {
                info!(
                    merge_requests = aggregation.results().len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "all child streams reconciled"
                );
                return Ok(aggregation.into_results());
            }
        }

        Err(Error::Unreconciled {
            pending: aggregation.pending().len(),
        })
    }

    /// Fetch projects, then every project's merge requests
    pub async fn run_all(&self) -> Result<Vec<Record>> {
        let parents = self.get_parents().await?;
        self.start_child_fetches(&parents).await
    }

    /// [`run_all`](Self::run_all), delivering the merged result to a callback
    ///
    /// The callback runs at most once, and only on success.
    pub async fn run_all_with<F>(&self, on_all_complete: F) -> Result<()>
    where
        F: FnOnce(Vec<Record>),
    {
        let results = self.run_all().await?;
        on_all_complete(results);
        Ok(())
    }
}
