//! Integration tests for the HTTP client functionality.
//!
//! These tests verify request validation, default headers, error pass-through,
//! throttling retry and cancellation of in-flight calls.

use std::time::Duration;

use sharepoint_rest::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use sharepoint_rest::{AccessToken, ClientConfig, InvalidHttpRequestError};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(tries: u32) -> HttpClient {
    let config = ClientConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .user_agent_prefix("MyApp/1.0")
        .tries(tries)
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

fn get(server: &MockServer, route: &str) -> HttpRequest {
    HttpRequest::builder(HttpMethod::Get, format!("{}{route}", server.uri()))
        .build()
        .unwrap()
}

// ============================================================================
// Request Validation Tests
// ============================================================================

#[test]
fn test_post_without_body_is_rejected() {
    let result = HttpRequest::builder(
        HttpMethod::Post,
        "https://mock.sharepoint.com/_api/web/GetChanges",
    )
    .build();

    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingBody { .. })
    ));
}

#[test]
fn test_relative_url_is_rejected() {
    let result = HttpRequest::builder(HttpMethod::Get, "_api/web").build();

    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::RelativeUrl { .. })
    ));
}

// ============================================================================
// Default Header Tests
// ============================================================================

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_api/web"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_regex(
            "user-agent",
            r"^MyApp/1\.0 \| SharePoint REST Library v\S+ \| Rust",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(1);
    let response = client
        .request(&get(&server, "/_api/web"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(response.is_ok());
}

// ============================================================================
// Error and Retry Tests
// ============================================================================

#[tokio::test]
async fn test_error_response_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("SPRequestGuid", "guid-403")
                .set_body_string("Access denied"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = create_test_client(3)
        .request(&get(&server, "/_api/web"), &CancellationToken::new())
        .await
        .unwrap_err();

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 403);
            assert_eq!(e.body, "Access denied");
            assert_eq!(e.error_reference.as_deref(), Some("guid-403"));
        }
        other => panic!("expected Response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_throttled_request_is_not_retried_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let error = create_test_client(1)
        .request(&get(&server, "/_api/web"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(429));
}

#[tokio::test]
async fn test_throttled_request_exhausts_configured_tries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let error = create_test_client(3)
        .request(&get(&server, "/_api/web"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::MaxRetries(ref e) if e.tries == 3 && e.code == 503));
}

// ============================================================================
// Cancellation Tests
// ============================================================================

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let error = create_test_client(1)
        .request(&get(&server, "/_api/web"), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::Cancelled));
}
