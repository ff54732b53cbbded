//! HTTP client for SharePoint REST communication.
//!
//! This module provides the [`HttpClient`] type, the execution engine every
//! resource request delegates to. It owns the transport, attaches the
//! authentication and User-Agent headers, honors cancellation and optionally
//! retries throttled responses.

use std::collections::HashMap;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest, JSON_CONTENT_TYPE};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;
use crate::error::ConfigError;

/// Fixed retry wait time in seconds, used when `Retry-After` is absent.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the SharePoint REST API.
///
/// The client handles:
/// - Default headers including User-Agent and the bearer token
/// - Cancellation of the in-flight call through a [`CancellationToken`]
/// - Automatic retry for 429 and 503 responses when `tries > 1`
///
/// Protocol headers (`Accept`, `odata-version`) are not added here; they are
/// attached once by the resource layer when a request object is constructed.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
    tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the underlying reqwest
    /// client cannot be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use sharepoint_rest::{AccessToken, ClientConfig};
    /// use sharepoint_rest::clients::HttpClient;
    ///
    /// let config = ClientConfig::builder()
    ///     .access_token(AccessToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert!(client.default_headers().contains_key("Authorization"));
    /// ```
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}SharePoint REST Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClientBuild {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            default_headers,
            tries: config.tries(),
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns how many times a throttled request is attempted.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Sends an HTTP request.
    ///
    /// The request is sent exactly as built; retries resend the same headers
    /// and body without rebuilding anything. Cancellation is checked before
    /// the first attempt, raced against every in-flight call and against the
    /// back-off sleep between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    /// - The token is cancelled (`Cancelled`)
    pub async fn request(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        if cancel.is_cancelled() {
            return Err(HttpError::Cancelled);
        }

        let url = request.full_url();
        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(method = %request.http_method, %url, attempt = tries, "sending request");

            let response = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(HttpError::Cancelled),
                result = self.send_once(request, &url) => result?,
            };

            if response.is_ok() {
                return Ok(response);
            }

            let code = response.code;
            let error_reference = response.request_id().map(String::from);
            let should_retry = code == 429 || code == 503;

            if !should_retry || self.tries == 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    body: response.body,
                    error_reference,
                }));
            }

            if tries >= self.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: self.tries,
                    body: response.body,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::warn!(status = code, ?delay, %url, "request throttled, retrying");

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(HttpError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn send_once(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            if request.header("content-type").is_none() {
                req_builder = req_builder.header("Content-Type", JSON_CONTENT_TYPE);
            }
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        response
            .retry_request_after
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map_or(Duration::from_secs(RETRY_WAIT_TIME), Duration::from_secs_f64)
    }
}
