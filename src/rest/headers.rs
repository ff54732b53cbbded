//! Protocol headers attached to every resource request.
//!
//! SharePoint's REST endpoint negotiates its JSON dialect from two headers:
//! `Accept` and `odata-version`. [`HeaderPolicy::apply`] puts both into a
//! [`HeaderSet`] once, when a request object is constructed; the set keys
//! names case-insensitively so neither header can end up on the wire twice.

/// Name of the accept-format header.
pub const ACCEPT_HEADER_NAME: &str = "Accept";

/// Canonical JSON media type requested from the server.
pub const ACCEPT_HEADER_VALUE: &str = "application/json";

/// Name of the OData protocol-version header.
pub const ODATA_VERSION_HEADER_NAME: &str = "odata-version";

/// Canonical OData protocol version.
pub const ODATA_VERSION_HEADER_VALUE: &str = "4.0";

/// Request headers keyed by case-insensitive name, in insertion order.
///
/// # Example
///
/// ```rust
/// use sharepoint_rest::rest::HeaderSet;
///
/// let mut headers = HeaderSet::new();
/// headers.insert("Prefer", "return=minimal");
/// headers.insert("prefer", "return=representation");
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.get("PREFER"), Some("return=representation"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a header, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value of a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of distinct headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Attaches the protocol-mandated headers.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderPolicy;

impl HeaderPolicy {
    /// Ensures the accept-format and protocol-version headers are present
    /// with their canonical values. Applying twice has no further effect.
    pub fn apply(headers: &mut HeaderSet) {
        headers.insert(ACCEPT_HEADER_NAME, ACCEPT_HEADER_VALUE);
        headers.insert(ODATA_VERSION_HEADER_NAME, ODATA_VERSION_HEADER_VALUE);
    }

    /// Returns `true` for headers owned by the policy.
    #[must_use]
    pub fn is_protocol_header(name: &str) -> bool {
        name.eq_ignore_ascii_case(ACCEPT_HEADER_NAME)
            || name.eq_ignore_ascii_case(ODATA_VERSION_HEADER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_adds_both_headers() {
        let mut headers = HeaderSet::new();
        HeaderPolicy::apply(&mut headers);

        assert_eq!(headers.get("accept"), Some(ACCEPT_HEADER_VALUE));
        assert_eq!(headers.get("OData-Version"), Some(ODATA_VERSION_HEADER_VALUE));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut headers = HeaderSet::new();
        HeaderPolicy::apply(&mut headers);
        HeaderPolicy::apply(&mut headers);

        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_apply_restores_canonical_values() {
        let mut headers = HeaderSet::new();
        headers.insert("ACCEPT", "text/xml");
        HeaderPolicy::apply(&mut headers);

        assert_eq!(headers.get("Accept"), Some(ACCEPT_HEADER_VALUE));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_is_protocol_header() {
        assert!(HeaderPolicy::is_protocol_header("accept"));
        assert!(HeaderPolicy::is_protocol_header("ODATA-VERSION"));
        assert!(!HeaderPolicy::is_protocol_header("If-Match"));
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut headers = HeaderSet::new();
        HeaderPolicy::apply(&mut headers);
        headers.insert("X-Trace", "1");

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Accept", "odata-version", "X-Trace"]);
    }
}
