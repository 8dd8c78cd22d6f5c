//! Tests for the HTTP module

use super::client::parse_items;
use super::*;
use crate::error::Error;
use crate::pagination::{PageCursor, RequestParams};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(page: u32) -> RequestParams {
    RequestParams::new("secret", PageCursor::new(page, 2))
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("gitlab-harvest/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");

    let config = HttpClientConfig::builder().no_timeout().build();
    assert!(config.timeout.is_none());
}

#[test]
fn test_parse_items_requires_array() {
    let items = parse_items(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
    assert_eq!(items.len(), 2);

    assert!(parse_items("[]").unwrap().is_empty());

    let err = parse_items(r#"{"message": "401 Unauthorized"}"#).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("an object"));

    assert!(matches!(
        parse_items("not json").unwrap_err(),
        Error::JsonParse(_)
    ));
}

#[test]
fn test_page_next_link() {
    let page = Page::new(vec![json!({"id": 1})]).with_header(
        "Link",
        r#"<https://gitlab.example.com/api/v3/projects?page=2&per_page=2>; rel="next", <https://gitlab.example.com/api/v3/projects?page=1&per_page=2>; rel="first""#,
    );

    assert!(!page.is_empty());
    assert_eq!(
        page.next_link().as_deref(),
        Some("https://gitlab.example.com/api/v3/projects?page=2&per_page=2")
    );
    assert!(Page::new(Vec::new()).next_link().is_none());
}

#[tokio::test]
async fn test_get_page_sends_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .and(query_param("per_page", "2"))
        .and(query_param("private_token", "secret"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Project1"},
                {"id": 2, "name": "Project2"}
            ])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/api/v3/projects", mock_server.uri());
    let page = client.get_page(&url, &params(1)).await.unwrap();

    assert_eq!(page.body.len(), 2);
    assert_eq!(page.body[1]["name"], "Project2");
}

#[tokio::test]
async fn test_get_page_sends_state_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/7/merge_requests"))
        .and(query_param("state", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/api/v3/projects/7/merge_requests", mock_server.uri());
    let page = client
        .get(&url, &params(1).with_state("all"))
        .await
        .unwrap();

    assert!(page.is_empty());
}

#[tokio::test]
async fn test_get_page_keeps_link_header() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/api/v3/projects?page=2&per_page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!("<{next}>; rel=\"next\"").as_str())
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/api/v3/projects", mock_server.uri());
    let page = client.get_page(&url, &params(1)).await.unwrap();

    assert_eq!(page.next_link(), Some(next));
}

#[tokio::test]
async fn test_get_page_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .and(header("X-Trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().header("X-Trace", "abc").build();
    let client = HttpClient::with_config(config).unwrap();
    let url = format!("{}/api/v3/projects", mock_server.uri());

    client.get_page(&url, &params(1)).await.unwrap();
}

#[tokio::test]
async fn test_get_page_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401 Unauthorized"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/api/v3/projects", mock_server.uri());
    let err = client.get_page(&url, &params(1)).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "401 Unauthorized");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_page_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/api/v3/projects", mock_server.uri());
    let err = client.get_page(&url, &params(1)).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_get_page_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let url = format!("{}/api/v3/projects", mock_server.uri());
    let err = client.get_page(&url, &params(1)).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 100 }));
}
