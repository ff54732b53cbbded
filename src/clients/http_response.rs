//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type. The body is kept as raw
//! text; decoding into typed entities happens at the resource layer so that a
//! malformed payload surfaces as a serialization error instead of being
//! silently replaced.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// An HTTP response from the SharePoint REST API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` when present.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the correlation id of the request, if the server sent one.
    ///
    /// SharePoint Online sends `request-id`; on-premises farms send
    /// `SPRequestGuid`. Both carry the same value when present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        ["request-id", "sprequestguid"]
            .iter()
            .find_map(|name| self.headers.get(*name).and_then(|values| values.first()))
            .map(String::as_str)
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the body is not valid
    /// JSON or does not match the shape of `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
