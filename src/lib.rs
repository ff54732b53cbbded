//! # SharePoint REST client
//!
//! A fluent, async client for the SharePoint REST (`_api`) surface.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the access token and site URL
//! - Fluent navigation from a site to its webs, lists, items and navigation
//! - Id-versus-title list addressing validated before any request is sent
//! - Protocol headers (`Accept`, `odata-version`) attached once per request
//! - Lazy, cancellable streams over paged collections and change logs
//! - An async HTTP client with cancellation and optional throttling retry
//!
//! ## Quick Start
//!
//! ```rust
//! use sharepoint_rest::{AccessToken, ClientConfig, RestClient, SiteUrl};
//!
//! let config = ClientConfig::builder()
//!     .access_token(AccessToken::new("eyJ0eXAi...").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::new(&config).unwrap();
//! let site = SiteUrl::new("https://contoso.sharepoint.com/sites/team").unwrap();
//!
//! let list = client.api(&site).web().list_by_title("Events").unwrap();
//! assert_eq!(
//!     list.url().as_str(),
//!     "https://contoso.sharepoint.com/sites/team/_api/web/lists/getByTitle('Events')"
//! );
//! ```
//!
//! ## Reading Resources
//!
//! ```rust,ignore
//! use sharepoint_rest::rest::{CollectionRequest, ResourceRequest};
//!
//! let web = client.api(&site).web();
//!
//! let list = web.list_by_title("Events")?.request().get().await?;
//! let first_page = web.lists().request().top(20).get().await?;
//! let navigation = web.navigation().request().get().await?;
//! ```
//!
//! ## Change Logs
//!
//! ```rust,ignore
//! use futures_util::TryStreamExt;
//! use sharepoint_rest::rest::{ChangeLog, ChangeQuery};
//!
//! let query = ChangeQuery {
//!     item: Some(true),
//!     add: Some(true),
//!     ..ChangeQuery::default()
//! };
//!
//! let mut changes = client.api(&site).site().request().get_changes(&query);
//! while let Some(change) = changes.try_next().await? {
//!     println!("{:?} {:?}", change.change_type, change.item_id);
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every async operation has a `*_with_cancellation` form taking a
//! [`tokio_util::sync::CancellationToken`]. Cancelling aborts the in-flight
//! call and stops paged streams before their next page fetch.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: bad identifiers fail when the builder is created
//! - **Errors pass through**: HTTP failures keep their original status and body
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ClientConfig, ClientConfigBuilder, SiteUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, RestClient,
};

// Re-export the resource layer's core types
pub use rest::{ChangeQuery, CollectionPage, ResourceError};
