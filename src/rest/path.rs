//! Resource path composition.
//!
//! A [`ResourceUrl`] is built by appending [`Segment`]s in navigation order
//! (`_api` → `web` → `lists(...)` → `items(...)` → sub-resource). Appending
//! never mutates the receiver; it returns a new URL.
//!
//! # Addressing
//!
//! - [`Segment::Literal`]: a fixed token such as `web` or `GetChanges`
//! - [`Segment::ById`]: `resource('<guid>')`
//! - [`Segment::ByName`]: `resource/getByTitle('<name>')`
//! - [`Segment::ByIndex`]: `resource(<n>)` for integer keys such as item ids
//!
//! Names are quoted OData string literals: embedded single quotes are doubled
//! and everything outside the unreserved set is percent-encoded, so titles
//! with spaces, slashes or non-ASCII characters stay inside their segment.
//!
//! # Example
//!
//! ```rust
//! use sharepoint_rest::rest::{ResourceUrl, Segment};
//!
//! let web = ResourceUrl::new("https://contoso.sharepoint.com/sites/team/_api")
//!     .append(&Segment::Literal("web"));
//! let list = web.append(&Segment::ByName {
//!     resource: "lists",
//!     function: "getByTitle",
//!     name: "Bob's List",
//! });
//!
//! assert_eq!(
//!     list.as_str(),
//!     "https://contoso.sharepoint.com/sites/team/_api/web/lists/getByTitle('Bob''s%20List')"
//! );
//! ```

use std::fmt;

/// One path component appended to a [`ResourceUrl`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A literal path token. Leading and trailing slashes are ignored.
    Literal(&'a str),
    /// An identifier-addressed resource: `resource('<guid>')`.
    ById {
        /// The collection name, e.g. `lists`.
        resource: &'a str,
        /// The GUID text, written as given.
        id: &'a str,
    },
    /// A name-addressed resource: `resource/function('<name>')`.
    ByName {
        /// The collection name, e.g. `lists`.
        resource: &'a str,
        /// The lookup function, e.g. `getByTitle`.
        function: &'a str,
        /// The unescaped name.
        name: &'a str,
    },
    /// An integer-keyed resource: `resource(<index>)`.
    ByIndex {
        /// The collection name, e.g. `items`.
        resource: &'a str,
        /// The integer key.
        index: u32,
    },
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(token) => f.write_str(token.trim_matches('/')),
            Self::ById { resource, id } => write!(f, "{resource}('{id}')"),
            Self::ByName {
                resource,
                function,
                name,
            } => write!(f, "{resource}/{function}('{}')", escape_string_literal(name)),
            Self::ByIndex { resource, index } => write!(f, "{resource}({index})"),
        }
    }
}

/// An immutable absolute REST URL.
///
/// # Thread Safety
///
/// `ResourceUrl` is a plain owned string; clones are independent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceUrl(String);

impl ResourceUrl {
    /// Creates a URL from an absolute base, trimming trailing slashes.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    /// Returns a new URL with `segment` appended.
    ///
    /// Empty literal segments leave the URL unchanged.
    #[must_use]
    pub fn append(&self, segment: &Segment<'_>) -> Self {
        let rendered = segment.to_string();
        if rendered.is_empty() {
            return self.clone();
        }
        Self(format!("{}/{rendered}", self.0))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes a value for use inside a quoted OData string literal in a path.
///
/// Single quotes are doubled; every other character outside the unreserved
/// set is percent-encoded as UTF-8.
#[must_use]
pub fn escape_string_literal(value: &str) -> String {
    value
        .split('\'')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("''")
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceUrl>();
    assert_send_sync::<Segment<'static>>();
};
