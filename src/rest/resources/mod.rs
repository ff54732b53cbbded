//! Resource builders, requests and entity models.
//!
//! Navigation mirrors the REST surface:
//!
//! ```text
//! _api                           ApiRequestBuilder
//!   site                         SiteRequestBuilder
//!     rootWeb                    WebRequestBuilder
//!   web                          WebRequestBuilder
//!     navigation                 NavigationRequestBuilder
//!     lists                      ListCollectionRequestBuilder
//!     lists('<guid>')            ListRequestBuilder
//!     lists/getByTitle('<t>')    ListRequestBuilder
//!       items                    ListItemCollectionRequestBuilder
//!       items(<id>)              ListItemRequestBuilder
//! ```
//!
//! Builders are cheap and only compose URLs. Each builder's `request()`
//! returns the terminal request object carrying the protocol headers and the
//! operations (`get`, `update`, `delete`, `add`, `stream`, `get_changes`).

mod api;
mod list;
mod list_item;
mod navigation;
mod site;
mod web;

pub use api::{ApiRequestBuilder, API_SEGMENT};
pub use list::{
    List, ListCollectionRequest, ListCollectionRequestBuilder, ListCreationInformation,
    ListRequest, ListRequestBuilder, ListUpdate,
};
pub use list_item::{
    ListItem, ListItemCollectionRequest, ListItemCollectionRequestBuilder, ListItemFields,
    ListItemRequest, ListItemRequestBuilder,
};
pub use navigation::{
    Navigation, NavigationNode, NavigationRequest, NavigationRequestBuilder, NAVIGATION_EXPAND,
};
pub use site::{Site, SiteRequest, SiteRequestBuilder};
pub use web::{Web, WebRequest, WebRequestBuilder, WebUpdate};
