//! Page wrapper for collection responses.
//!
//! Collection endpoints answer with
//! `{"value": [...], "@odata.nextLink": "<absolute url>"}`. [`CollectionPage`]
//! holds one such page and implements `Deref<Target = [T]>`, so it can be
//! used like a slice:
//!
//! ```rust,ignore
//! let page = web.lists().request().top(10).get().await?;
//!
//! for list in page.iter() {
//!     println!("{}", list.title);
//! }
//!
//! if page.has_next_page() {
//!     // or use `.stream()` to walk every page lazily
//! }
//! ```

use std::ops::Deref;

use serde::Deserialize;

/// One page of a collection response.
///
/// # Example
///
/// ```rust
/// use sharepoint_rest::rest::CollectionPage;
///
/// let page: CollectionPage<u32> = serde_json::from_str(
///     r#"{"value":[1,2,3],"@odata.nextLink":"https://contoso/_api/web/lists?$skiptoken=3"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(page.len(), 3);
/// assert_eq!(page[0], 1);
/// assert!(page.has_next_page());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionPage<T> {
    #[serde(rename = "value", default = "Vec::new")]
    items: Vec<T>,
    #[serde(rename = "@odata.nextLink", alias = "odata.nextLink", default)]
    next_link: Option<String>,
}

impl<T> CollectionPage<T> {
    /// Creates a page from items and an optional continuation link.
    #[must_use]
    pub const fn new(items: Vec<T>, next_link: Option<String>) -> Self {
        Self { items, next_link }
    }

    /// Returns the absolute URL of the next page, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Returns `true` if the server reported another page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_link.is_some()
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Consumes the page and returns its items and continuation link.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next_link)
    }
}

impl<T> Deref for CollectionPage<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for CollectionPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_next_link() {
        let page: CollectionPage<String> = serde_json::from_str(r#"{"value":["a","b"]}"#).unwrap();
        assert_eq!(page.len(), 2);
        assert!(!page.has_next_page());
        assert!(page.next_link().is_none());
    }

    #[test]
    fn test_deserialize_accepts_legacy_next_link_name() {
        let page: CollectionPage<String> =
            serde_json::from_str(r#"{"value":[],"odata.nextLink":"https://x/next"}"#).unwrap();
        assert_eq!(page.next_link(), Some("https://x/next"));
    }

    #[test]
    fn test_missing_value_is_an_empty_page() {
        let page: CollectionPage<String> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result: Result<CollectionPage<String>, _> = serde_json::from_str(r#"{"value":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_parts_preserves_order() {
        let page = CollectionPage::new(vec![3, 1, 2], Some("next".to_string()));
        let (items, next) = page.into_parts();
        assert_eq!(items, vec![3, 1, 2]);
        assert_eq!(next.as_deref(), Some("next"));
    }
}
