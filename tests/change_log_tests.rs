//! Integration tests for change-log queries.
//!
//! These tests verify the `GetChanges` body shape, the lazy walk across
//! continuation links, failure handling mid-walk and cancellation.

use futures_util::{StreamExt, TryStreamExt};
use serde_json::json;
use sharepoint_rest::rest::{ChangeLog, ChangeQuery, ChangeType, ResourceError};
use sharepoint_rest::{AccessToken, ClientConfig, RestClient, SiteUrl};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITE_CHANGES_PATH: &str = "/sites/mockSite/_api/site/GetChanges";

fn create_test_client() -> RestClient {
    let config = ClientConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

fn mock_site(server: &MockServer) -> SiteUrl {
    SiteUrl::new(format!("{}/sites/mockSite", server.uri())).unwrap()
}

fn next_link(server: &MockServer) -> String {
    format!("{}{SITE_CHANGES_PATH}?$skiptoken=page2", server.uri())
}

fn change(token: &str, change_type: i32) -> serde_json::Value {
    json!({
        "ChangeToken": {"StringValue": token},
        "ChangeType": change_type,
        "SiteId": "2f1f2d2e-0d0e-4d79-9f6b-1a7c4f1e5b0a",
        "Time": "2024-03-01T10:15:00Z"
    })
}

fn tokens(changes: &[sharepoint_rest::rest::Change]) -> Vec<String> {
    changes
        .iter()
        .map(|c| c.change_token.as_ref().unwrap().string_value.clone())
        .collect()
}

/// Mounts page 2 before page 1 so the more specific mock wins.
async fn mount_two_pages(server: &MockServer, page_two: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(page_two)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [change("t1", 1), change("t2", 2)],
            "@odata.nextLink": next_link(server)
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Body Shape Tests
// ============================================================================

#[tokio::test]
async fn test_empty_query_posts_empty_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .and(body_json(json!({"query": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let changes: Vec<_> = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes(&ChangeQuery::default())
        .try_collect()
        .await
        .unwrap();

    assert!(changes.is_empty());
}

#[tokio::test]
async fn test_explicit_false_flags_are_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sites/mockSite/_api/web/GetChanges"))
        .and(body_json(json!({"query": {"Item": true, "DeleteObject": false}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let query = ChangeQuery {
        item: Some(true),
        delete_object: Some(false),
        ..ChangeQuery::default()
    };

    let result: Result<Vec<_>, _> = create_test_client()
        .api(&mock_site(&server))
        .web()
        .request()
        .get_changes(&query)
        .try_collect()
        .await;

    assert!(result.is_ok());
}

// ============================================================================
// Paging Tests
// ============================================================================

#[tokio::test]
async fn test_two_pages_are_walked_in_order() {
    let server = MockServer::start().await;
    mount_two_pages(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "value": [change("t3", 3)]
        })),
    )
    .await;

    let changes: Vec<_> = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes(&ChangeQuery::default())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(tokens(&changes), vec!["t1", "t2", "t3"]);
    assert_eq!(changes[0].change_type, ChangeType::Add);
    assert_eq!(changes[2].change_type, ChangeType::DeleteObject);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_relative_next_link_is_resolved_against_site() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [change("t2", 2)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [change("t1", 1)],
            "@odata.nextLink": format!("{SITE_CHANGES_PATH}?$skiptoken=page2")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let changes: Vec<_> = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes(&ChangeQuery::default())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(tokens(&changes), vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_failed_page_ends_walk_after_yielded_records() {
    let server = MockServer::start().await;
    mount_two_pages(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let mut stream = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes(&ChangeQuery::default());

    let first = stream.next().await.unwrap().unwrap();
    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(tokens(&[first, second]), vec!["t1", "t2"]);

    let error = stream.next().await.unwrap().unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert!(error.to_string().contains("boom"));

    assert!(stream.next().await.is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_page_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let result: Result<Vec<_>, _> = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes(&ChangeQuery::default())
        .try_collect()
        .await;

    assert!(matches!(
        result,
        Err(ResourceError::Serialization {
            resource: "Change",
            ..
        })
    ));
}

#[tokio::test]
async fn test_reinvocation_starts_an_independent_walk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [change("t1", 1)]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let request = create_test_client().api(&mock_site(&server)).site().request();
    let query = ChangeQuery {
        add: Some(true),
        ..ChangeQuery::default()
    };

    let first: Vec<_> = request.get_changes(&query).try_collect().await.unwrap();
    let second: Vec<_> = request.get_changes(&query).try_collect().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_stream_is_lazy_until_polled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(0)
        .mount(&server)
        .await;

    let stream = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes(&ChangeQuery::default());
    drop(stream);

    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Cancellation Tests
// ============================================================================

#[tokio::test]
async fn test_cancellation_stops_before_next_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SITE_CHANGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [change("t1", 1), change("t2", 2)],
            "@odata.nextLink": next_link(&server)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut stream = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes_with_cancellation(&ChangeQuery::default(), &cancel);

    assert!(stream.next().await.unwrap().is_ok());
    cancel.cancel();

    // The rest of the already fetched page is still delivered.
    assert!(stream.next().await.unwrap().is_ok());

    let error = stream.next().await.unwrap().unwrap_err();
    assert!(error.is_cancelled());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result: Result<Vec<_>, _> = create_test_client()
        .api(&mock_site(&server))
        .site()
        .request()
        .get_changes_with_cancellation(&ChangeQuery::default(), &cancel)
        .try_collect()
        .await;

    assert!(result.unwrap_err().is_cancelled());
}
