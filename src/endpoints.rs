//! GitLab v3 endpoint and query parameter builders
//!
//! Pure functions, no I/O. URLs never carry a query string; the params are
//! sent separately by the transport.

use crate::pagination::{PageCursor, RequestParams};
use crate::types::StateFilter;
use url::form_urlencoded;

/// Project collection endpoint
pub fn project_url(host: &str) -> String {
    format!("{}/api/v3/projects", host.trim_end_matches('/'))
}

/// Merge request collection endpoint of one project
pub fn merge_request_url(host: &str, project_id: &str) -> String {
    format!(
        "{}/api/v3/projects/{project_id}/merge_requests",
        host.trim_end_matches('/')
    )
}

/// `{per_page, private_token, page}`
pub fn base_params(token: &str, page: u32, per_page: u32) -> RequestParams {
    RequestParams::new(token, PageCursor::new(page, per_page))
}

/// Base params plus `state=all`
pub fn merge_request_params(token: &str, page: u32, per_page: u32) -> RequestParams {
    merge_request_params_with_state(token, page, per_page, StateFilter::All)
}

/// Base params plus an explicit `state` filter
pub fn merge_request_params_with_state(
    token: &str,
    page: u32,
    per_page: u32,
    state: StateFilter,
) -> RequestParams {
    base_params(token, page, per_page).with_state(state.as_str())
}

/// Full request URL as the transport would issue it
pub fn request_url(url: &str, params: &RequestParams) -> String {
    format!("{url}?{}", params.to_query_string())
}

/// Decoded value of `name` in a query string such as `?private_token=x&gitlab=y`
///
/// The leading `?` is optional. The last occurrence wins.
pub fn query_param(qs: &str, name: &str) -> Option<String> {
    let qs = qs.strip_prefix('?').unwrap_or(qs);
    form_urlencoded::parse(qs.as_bytes())
        .filter(|(key, _)| key == name)
        .last()
        .map(|(_, value)| value.into_owned())
}
