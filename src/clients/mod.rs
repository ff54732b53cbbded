//! HTTP execution layer for the SharePoint REST API.
//!
//! This module provides the transport every resource request delegates to:
//!
//! - [`HttpClient`]: sends [`HttpRequest`]s with authentication, cancellation
//!   and optional retry of throttled responses
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: an absolute URL, headers,
//!   query parameters and an optional JSON body
//! - [`HttpResponse`]: status, lowercased headers and the raw body
//! - [`RestClient`]: the root of the fluent resource API
//!
//! # Error Handling
//!
//! Failures surface as [`HttpError`], which keeps the original status code
//! and body of non-2xx responses.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, JSON_CONTENT_TYPE};
pub use http_response::HttpResponse;

pub use rest::RestClient;
