//! Shared request state composed into every resource request.
//!
//! A [`BaseRequest`] owns a composed [`ResourceUrl`], a [`HeaderSet`] with the
//! protocol headers already applied, OData query options, and a handle to the
//! [`HttpClient`] that executes it. Concrete requests (site, web, list, ...)
//! embed one instead of inheriting from a common base type.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::rest::{HeaderPolicy, HeaderSet, ResourceError, ResourceUrl, Segment};

/// Header used for optimistic concurrency on writes.
pub const IF_MATCH_HEADER_NAME: &str = "IF-MATCH";

/// `IF-MATCH` value that matches any entity version.
pub const IF_MATCH_ANY: &str = "*";

/// URL, headers and query options for one resource request.
#[derive(Clone, Debug)]
pub struct BaseRequest {
    client: Arc<HttpClient>,
    url: ResourceUrl,
    headers: HeaderSet,
    query: Vec<(String, String)>,
}

impl BaseRequest {
    /// Creates a request for `url`, applying the [`HeaderPolicy`].
    #[must_use]
    pub fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        let mut headers = HeaderSet::new();
        HeaderPolicy::apply(&mut headers);
        Self {
            client,
            url,
            headers,
            query: Vec::new(),
        }
    }

    /// Returns the composed resource URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Returns the headers attached to this request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Returns the query options in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the client executing this request.
    #[must_use]
    pub const fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    /// Adds a caller header.
    ///
    /// Protocol headers are owned by the [`HeaderPolicy`] and cannot be
    /// overridden; attempts are logged and ignored.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if HeaderPolicy::is_protocol_header(&name) {
            tracing::warn!(header = %name, "ignoring override of protocol header");
            return;
        }
        self.headers.insert(name, value);
    }

    /// Sets an OData query option such as `$select`, replacing any previous value.
    pub fn set_query_option(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key.to_string(), value)),
        }
    }

    /// Returns a fresh request for a sub-resource of this one.
    ///
    /// The child gets its own header set; caller headers and query options
    /// are not inherited.
    #[must_use]
    pub fn child(&self, segment: &Segment<'_>) -> Self {
        Self::new(Arc::clone(&self.client), self.url.append(segment))
    }

    /// Returns a request for a service operation on this resource, such as
    /// `GetChanges`.
    ///
    /// Caller headers carry over; query options do not.
    #[must_use]
    pub fn operation(&self, name: &str) -> Self {
        Self {
            client: Arc::clone(&self.client),
            url: self.url.append(&Segment::Literal(name)),
            headers: self.headers.clone(),
            query: Vec::new(),
        }
    }

    /// Builds the HTTP request for this resource without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] wrapping
    /// [`InvalidRequest`](HttpError::InvalidRequest) if the method requires a
    /// body and none was given.
    pub fn to_http_request(
        &self,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<HttpRequest, ResourceError> {
        let mut builder = HttpRequest::builder(method, self.url.as_str());
        for (key, value) in &self.query {
            builder = builder.query_param(key.as_str(), value.as_str());
        }
        self.finish(builder, body)
    }

    /// Builds an HTTP request against an absolute continuation link.
    ///
    /// The link already carries the server's query string, so this
    /// request's query options are not appended again.
    pub(crate) fn to_http_request_at(
        &self,
        url: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<HttpRequest, ResourceError> {
        self.finish(HttpRequest::builder(method, url), body)
    }

    fn finish(
        &self,
        mut builder: crate::clients::HttpRequestBuilder,
        body: Option<Value>,
    ) -> Result<HttpRequest, ResourceError> {
        builder = builder.headers(self.headers.iter());
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder
            .build()
            .map_err(|e| ResourceError::Http(HttpError::InvalidRequest(e)))
    }

    /// Sends the request and returns the raw response.
    pub(crate) async fn send(
        &self,
        method: HttpMethod,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, ResourceError> {
        let request = self.to_http_request(method, body)?;
        Ok(self.client.request(&request, cancel).await?)
    }

    /// Sends a write that must match an entity version (`PATCH`, `DELETE`).
    ///
    /// Adds `IF-MATCH: *` unless the caller already set an `IF-MATCH` value.
    pub(crate) async fn send_conditional(
        &self,
        method: HttpMethod,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, ResourceError> {
        let mut request = self.to_http_request(method, body)?;
        if request.header(IF_MATCH_HEADER_NAME).is_none() {
            request
                .headers
                .push((IF_MATCH_HEADER_NAME.to_string(), IF_MATCH_ANY.to_string()));
        }
        Ok(self.client.request(&request, cancel).await?)
    }

    /// Sends the request and decodes the response body as `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        body: Option<Value>,
        resource: &'static str,
        cancel: &CancellationToken,
    ) -> Result<T, ResourceError> {
        let response = self.send(method, body, cancel).await?;
        response
            .json()
            .map_err(|e| ResourceError::serialization(resource, e))
    }
}

/// Serializes a write payload, naming the resource on failure.
pub(crate) fn to_body<S: serde::Serialize>(
    payload: &S,
    resource: &'static str,
) -> Result<Value, ResourceError> {
    serde_json::to_value(payload).map_err(|e| ResourceError::serialization(resource, e))
}
