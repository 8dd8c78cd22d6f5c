//! Pagination types
//!
//! Defines the cursor, request parameters and per-stream request log shared
//! by the paginator and the fan-out aggregator.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Record};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Largest page size GitLab accepts
pub const MAX_PER_PAGE: u32 = 100;

/// The `(page, per_page)` pair driving which page is requested next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// 1-based page number
    pub page: u32,
    /// Items requested per page
    pub per_page: u32,
}

impl PageCursor {
    /// Create a cursor at an arbitrary page
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Create a cursor at page 1
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// Move to the next page
    pub fn advance(&mut self) {
        self.page += 1;
    }

    /// Whether the cursor can drive a request
    pub fn is_valid(&self) -> bool {
        self.page >= 1 && self.per_page > 0
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first(MAX_PER_PAGE)
    }
}

/// Query parameters for one logical endpoint
///
/// The embedded [`PageCursor`] is the in-flight cursor: a paginator owns the
/// params for the whole run and advances them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    /// API token sent as `private_token`
    pub private_token: String,
    /// Page cursor (`page`, `per_page`)
    #[serde(flatten)]
    pub cursor: PageCursor,
    /// Optional `state` filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl RequestParams {
    /// Create params for a token and cursor
    pub fn new(private_token: impl Into<String>, cursor: PageCursor) -> Self {
        Self {
            private_token: private_token.into(),
            cursor,
            state: None,
        }
    }

    /// Set the `state` filter
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Current page number
    pub fn page(&self) -> u32 {
        self.cursor.page
    }

    /// Current page size
    pub fn per_page(&self) -> u32 {
        self.cursor.per_page
    }

    /// Query pairs in the order `per_page, private_token, page[, state]`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("per_page", self.cursor.per_page.to_string()),
            ("private_token", self.private_token.clone()),
            ("page", self.cursor.page.to_string()),
        ];
        if let Some(state) = &self.state {
            pairs.push(("state", state.clone()));
        }
        pairs
    }

    /// Serialize as a form-urlencoded query string (without leading `?`)
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Parse params back from a query string, with or without leading `?`
    pub fn from_query_string(qs: &str) -> Result<Self> {
        let qs = qs.strip_prefix('?').unwrap_or(qs);

        let mut token = None;
        let mut page = None;
        let mut per_page = None;
        let mut state = None;

        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            match key.as_ref() {
                "private_token" => token = Some(value.into_owned()),
                "page" => page = Some(parse_number("page", &value)?),
                "per_page" => per_page = Some(parse_number("per_page", &value)?),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }

        let token = token.ok_or_else(|| Error::query_string("missing 'private_token'"))?;
        let page = page.ok_or_else(|| Error::query_string("missing 'page'"))?;
        let per_page = per_page.ok_or_else(|| Error::query_string("missing 'per_page'"))?;

        Ok(Self {
            private_token: token,
            cursor: PageCursor::new(page, per_page),
            state,
        })
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| Error::query_string(format!("'{key}' is not a number: {value}")))
}

/// One issued page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Endpoint URL without query string
    pub url: String,
    /// Params as they were when the request was issued
    pub params: RequestParams,
}

impl RequestRecord {
    /// Create a record
    pub fn new(url: impl Into<String>, params: RequestParams) -> Self {
        Self {
            url: url.into(),
            params,
        }
    }
}

/// Per-stream metadata carried through a paginator run
///
/// `requests` is `None` for a bag that does not keep a request log; recording
/// into such a bag does nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBag {
    /// Log of issued requests, in issue order
    pub requests: Option<Vec<RequestRecord>>,
    /// Caller-defined fields
    #[serde(default)]
    pub fields: JsonObject,
}

impl RequestBag {
    /// Create a bag with an empty request log
    pub fn new() -> Self {
        Self {
            requests: Some(Vec::new()),
            fields: JsonObject::new(),
        }
    }

    /// Create a bag without a request log
    pub fn untracked() -> Self {
        Self {
            requests: None,
            fields: JsonObject::new(),
        }
    }

    /// Attach a caller-defined field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Get a caller-defined field
    pub fn field(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Append a request to the log, if there is one
    pub fn record(&mut self, url: &str, params: &RequestParams) {
        if let Some(requests) = self.requests.as_mut() {
            requests.push(RequestRecord::new(url, params.clone()));
        }
    }

    /// Logged requests (empty when untracked)
    pub fn requests(&self) -> &[RequestRecord] {
        self.requests.as_deref().unwrap_or_default()
    }

    /// Number of logged requests
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

/// Outcome of one exhausted paginator run
#[derive(Debug, Clone)]
pub struct PageRun {
    /// Every item from every non-empty page, in server order
    pub records: Vec<Record>,
    /// Params after the run; `cursor.page` points at the empty terminal page
    pub params: RequestParams,
    /// The bag threaded through the run
    pub bag: Option<RequestBag>,
    /// Number of non-empty pages consumed
    pub pages: usize,
}

impl PageRun {
    /// Number of page requests issued, including the empty terminal page
    pub fn requests_issued(&self) -> usize {
        self.pages + 1
    }
}

/// Append `new_data` to `target` in place
///
/// The target vector keeps its identity; no new accumulator is allocated.
pub fn merge_into(target: &mut Vec<Record>, new_data: Vec<Record>) {
    target.extend(new_data);
}
