//! Fluent access to the SharePoint REST surface.
//!
//! This module provides:
//!
//! - **Path composition**: [`ResourceUrl`] and [`Segment`] build resource URLs
//!   append-only, with OData string-literal escaping for names
//! - **Identifier resolution**: [`Identifier`] decides id-versus-title
//!   addressing and rejects nil GUIDs and blank names before any request
//! - **Header policy**: [`HeaderPolicy`] attaches `Accept` and
//!   `odata-version` once per request object
//! - **Resource requests**: [`ResourceRequest`] and the builders in
//!   [`resources`] for sites, webs, lists, items and navigation
//! - **Change logs**: [`ChangeQuery`] posted to `GetChanges`, walked lazily
//!   across pages into a stream of [`Change`] records
//!
//! # Example
//!
//! ```rust,ignore
//! use futures_util::TryStreamExt;
//! use sharepoint_rest::rest::{ChangeLog, ChangeQuery, ResourceRequest};
//!
//! let api = client.api(&site_url);
//!
//! let list = api.web().list_by_title("Events")?.request().select(&["Title"]).get().await?;
//! println!("{}", list.title);
//!
//! let query = ChangeQuery { add: Some(true), ..ChangeQuery::default() };
//! let changes: Vec<_> = api.site().request().get_changes(&query).try_collect().await?;
//! ```

mod changes;
mod errors;
mod headers;
mod identifier;
mod pager;
mod path;
mod request;
mod resource;
mod response;

pub mod resources;

pub use changes::{
    Change, ChangeLog, ChangeLogRequest, ChangeQuery, ChangeToken, ChangeType,
    GET_CHANGES_OPERATION,
};
pub use errors::ResourceError;
pub use headers::{
    HeaderPolicy, HeaderSet, ACCEPT_HEADER_NAME, ACCEPT_HEADER_VALUE, ODATA_VERSION_HEADER_NAME,
    ODATA_VERSION_HEADER_VALUE,
};
pub use identifier::{resolve_index, Identifier, MISSING_ID, MISSING_TITLE};
pub use pager::{paginate, PageStream};
pub use path::{escape_string_literal, ResourceUrl, Segment};
pub use request::{BaseRequest, IF_MATCH_ANY, IF_MATCH_HEADER_NAME};
pub use resource::{CollectionRequest, ResourceRequest, EXPAND_OPTION, SELECT_OPTION, TOP_OPTION};
pub use response::CollectionPage;
