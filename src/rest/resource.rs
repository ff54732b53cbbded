//! Shared surface of the terminal request types.
//!
//! Every resource request (site, web, list, item, navigation) embeds a
//! [`BaseRequest`] and implements [`ResourceRequest`] by exposing it. The
//! trait then provides the common fluent options and inspection helpers, so
//! the concrete types only carry their own operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_rest::rest::ResourceRequest;
//!
//! let request = api
//!     .web()
//!     .list_by_title("Events")?
//!     .request()
//!     .select(&["Title", "ItemCount"])
//!     .header("Prefer", "bypass-cache");
//!
//! let http = request.to_http_request()?;
//! assert!(http.full_url().ends_with("lists/getByTitle('Events')?$select=Title%2CItemCount"));
//! ```

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::{BaseRequest, HeaderSet, ResourceError, ResourceUrl};

/// OData option selecting the returned properties.
pub const SELECT_OPTION: &str = "$select";

/// OData option expanding related entities inline.
pub const EXPAND_OPTION: &str = "$expand";

/// OData option limiting the page size of a collection.
pub const TOP_OPTION: &str = "$top";

/// A terminal request for one resource.
///
/// Implementors only supply access to their [`BaseRequest`]; the remaining
/// methods have default implementations.
pub trait ResourceRequest: Sized {
    /// The singular resource name used in error values (e.g. "List").
    const NAME: &'static str;

    /// Returns the shared request state.
    fn base(&self) -> &BaseRequest;

    /// Returns the shared request state mutably.
    fn base_mut(&mut self) -> &mut BaseRequest;

    /// Returns the composed resource URL.
    #[must_use]
    fn url(&self) -> &ResourceUrl {
        self.base().url()
    }

    /// Returns the headers that will be sent.
    #[must_use]
    fn headers(&self) -> &HeaderSet {
        self.base().headers()
    }

    /// Adds a caller header. Protocol headers cannot be overridden.
    #[must_use]
    fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_mut().set_header(name, value);
        self
    }

    /// Restricts the returned properties (`$select`).
    #[must_use]
    fn select(mut self, fields: &[&str]) -> Self {
        self.base_mut().set_query_option(SELECT_OPTION, fields.join(","));
        self
    }

    /// Relations this resource always expands. [`expand`](Self::expand)
    /// keeps them ahead of any caller relations.
    const REQUIRED_EXPAND: &'static [&'static str] = &[];

    /// Expands related entities inline (`$expand`).
    #[must_use]
    fn expand(mut self, relations: &[&str]) -> Self {
        let mut merged: Vec<&str> = Self::REQUIRED_EXPAND.to_vec();
        for relation in relations {
            if !merged.contains(relation) {
                merged.push(*relation);
            }
        }
        self.base_mut()
            .set_query_option(EXPAND_OPTION, merged.join(","));
        self
    }

    /// Builds the GET request this resource would send, without sending it.
    ///
    /// # Errors
    ///
    /// Never fails for GET; the `Result` mirrors the write paths.
    fn to_http_request(&self) -> Result<HttpRequest, ResourceError> {
        self.base().to_http_request(HttpMethod::Get, None)
    }
}

/// Adds the `$top` option to collection requests.
pub trait CollectionRequest: ResourceRequest {
    /// Limits the number of entities per page (`$top`).
    #[must_use]
    fn top(mut self, count: u32) -> Self {
        self.base_mut().set_query_option(TOP_OPTION, count.to_string());
        self
    }
}
