//! Id-versus-name addressing for indexable resources.
//!
//! A list can be selected by its GUID or by its title. [`Identifier`] is the
//! resolved form of either, validated once when the builder is created so a
//! bad value fails before any request is sent.

use uuid::Uuid;

use crate::rest::{ResourceError, Segment};

/// Reason reported when a GUID or integer key is missing (nil GUID, id `0`).
pub const MISSING_ID: &str = "missing id";

/// Reason reported when a name is empty or whitespace only.
pub const MISSING_TITLE: &str = "missing title";

/// A validated resource identifier.
///
/// # Example
///
/// ```rust
/// use sharepoint_rest::rest::{Identifier, ResourceError};
///
/// let by_id = Identifier::resolve("6f094ea6-2222-4f2e-b864-54f706f8b07a", "List").unwrap();
/// assert!(matches!(by_id, Identifier::Guid { .. }));
///
/// let upper = Identifier::resolve("6F094EA6-2222-4F2E-B864-54F706F8B07A", "List").unwrap();
/// assert_eq!(
///     upper.segment("lists", "getByTitle").to_string(),
///     "lists('6F094EA6-2222-4F2E-B864-54F706F8B07A')"
/// );
///
/// let by_name = Identifier::resolve("Events", "List").unwrap();
/// assert_eq!(by_name, Identifier::Name("Events".to_string()));
///
/// let nil = Identifier::resolve("00000000-0000-0000-0000-000000000000", "List");
/// assert!(matches!(nil, Err(ResourceError::InvalidIdentifier { reason: "missing id", .. })));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// A non-nil GUID and the text it was parsed from.
    Guid {
        /// The parsed value.
        id: Uuid,
        /// The source text, used verbatim in paths.
        text: String,
    },
    /// A non-blank name.
    Name(String),
}

impl Identifier {
    /// Resolves a raw value into an identifier.
    ///
    /// A value that parses as a GUID (hyphenated, simple, braced or URN form)
    /// is treated as an id and keeps its original spelling; anything else is
    /// treated as a name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] with reason
    /// [`MISSING_ID`] for the nil GUID, or [`MISSING_TITLE`] for an empty or
    /// whitespace-only name.
    pub fn resolve(raw: &str, resource: &'static str) -> Result<Self, ResourceError> {
        let trimmed = raw.trim();
        match Uuid::try_parse(trimmed) {
            Ok(id) => Self::guid(id, trimmed.to_string(), resource),
            Err(_) => Self::from_name(raw, resource),
        }
    }

    /// Wraps a GUID, rejecting the nil GUID. Paths render it lowercase
    /// hyphenated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] with reason [`MISSING_ID`]
    /// if `id` is nil.
    pub fn from_guid(id: Uuid, resource: &'static str) -> Result<Self, ResourceError> {
        Self::guid(id, id.hyphenated().to_string(), resource)
    }

    fn guid(id: Uuid, text: String, resource: &'static str) -> Result<Self, ResourceError> {
        if id.is_nil() {
            return Err(ResourceError::InvalidIdentifier {
                resource,
                reason: MISSING_ID,
            });
        }
        Ok(Self::Guid { id, text })
    }

    /// Wraps a name without attempting GUID parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] with reason
    /// [`MISSING_TITLE`] if `name` is empty or whitespace only.
    pub fn from_name(name: impl Into<String>, resource: &'static str) -> Result<Self, ResourceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ResourceError::InvalidIdentifier {
                resource,
                reason: MISSING_TITLE,
            });
        }
        Ok(Self::Name(name))
    }

    /// Returns the path segment addressing this identifier within `resource`.
    ///
    /// Names are looked up through `function` (e.g. `getByTitle`).
    #[must_use]
    pub fn segment<'a>(&'a self, resource: &'a str, function: &'a str) -> Segment<'a> {
        match self {
            Self::Guid { text, .. } => Segment::ById { resource, id: text },
            Self::Name(name) => Segment::ByName {
                resource,
                function,
                name,
            },
        }
    }
}

/// Validates an integer key such as a list item id.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidIdentifier`] with reason [`MISSING_ID`]
/// if `index` is zero.
pub fn resolve_index(index: u32, resource: &'static str) -> Result<u32, ResourceError> {
    if index == 0 {
        return Err(ResourceError::InvalidIdentifier {
            resource,
            reason: MISSING_ID,
        });
    }
    Ok(index)
}
