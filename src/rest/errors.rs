//! Error types for resource operations.
//!
//! - [`ResourceError::InvalidIdentifier`]: raised locally, before any request,
//!   when an id is nil/zero or a name is blank
//! - [`ResourceError::Http`]: transport and HTTP status errors, passed through
//!   from the [`HttpClient`](crate::clients::HttpClient) untouched
//! - [`ResourceError::Serialization`]: a request body could not be encoded or a
//!   response body could not be decoded into the expected shape
//!
//! # Example
//!
//! ```rust,ignore
//! use sharepoint_rest::rest::ResourceError;
//!
//! match web.list("Events")?.request().get().await {
//!     Ok(list) => println!("{}", list.title),
//!     Err(ResourceError::Http(e)) if e.status() == Some(404) => println!("no such list"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The identifier used to address a resource is missing or blank.
    ///
    /// Never retried; no request was sent.
    #[error("Invalid {resource} identifier: {reason}")]
    InvalidIdentifier {
        /// The type name of the resource (e.g., "List").
        resource: &'static str,
        /// `"missing id"` or `"missing title"`.
        reason: &'static str,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A payload could not be encoded or decoded.
    #[error("Failed to process {resource} payload: {source}")]
    Serialization {
        /// The type name of the payload (e.g., "ChangeQuery", "List").
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ResourceError {
    /// Returns `true` if the error was caused by cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Http(HttpError::Cancelled))
    }

    /// Returns the HTTP status code, if the error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the server correlation id, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            Self::Http(HttpError::MaxRetries(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn serialization(resource: &'static str, source: serde_json::Error) -> Self {
        Self::Serialization { resource, source }
    }
}
