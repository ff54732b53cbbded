//! HTTP-specific error types.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, request validation failures and cancellation.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, with the original status and body
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_rest::clients::HttpError;
//!
//! match client.request(request, &cancel).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.body),
//!     Err(HttpError::MaxRetries(e)) => println!("Retries exhausted after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(HttpError::Cancelled) => println!("Cancelled"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The status code and body are kept exactly as the server sent them so
/// callers can apply their own interpretation and retry policy.
///
/// # Example
///
/// ```rust
/// use sharepoint_rest::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     body: r#"{"error":{"code":"-2130575322","message":"List does not exist."}}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error)]
#[error("Request failed with status {code}: {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
    /// Correlation id for error reporting (from `request-id` or `SPRequestGuid`).
    pub error_reference: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429 or 503 responses after all
/// configured attempts were made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last status {code}: {body}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The raw body of the last response.
    pub body: String,
    /// Correlation id of the last response.
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request URL is not absolute.
    #[error("Request URL '{url}' is not an absolute http(s) URL.")]
    RelativeUrl {
        /// The offending URL.
        url: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the request completed.
    #[error("Request was cancelled")]
    Cancelled,
}

impl HttpError {
    /// Returns the HTTP status code carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_keeps_original_body() {
        let error = HttpResponseError {
            code: 500,
            body: "Internal Server Error".to_string(),
            error_reference: None,
        };
        assert_eq!(
            error.to_string(),
            "Request failed with status 500: Internal Server Error"
        );
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            body: String::new(),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains("Exceeded maximum retry count of 3"));
        assert!(message.contains("429"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "POST".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot use POST without specifying data."
        );
    }

    #[test]
    fn test_status_accessor() {
        let error = HttpError::Response(HttpResponseError {
            code: 403,
            body: String::new(),
            error_reference: None,
        });
        assert_eq!(error.status(), Some(403));
        assert_eq!(HttpError::Cancelled.status(), None);
    }
}
