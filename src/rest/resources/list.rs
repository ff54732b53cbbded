//! List resources (`web/lists`, `web/lists('<guid>')`,
//! `web/lists/getByTitle('<title>')`).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::clients::{HttpClient, HttpMethod};
use crate::rest::request::to_body;
use crate::rest::resources::{ListItemCollectionRequestBuilder, ListItemRequestBuilder};
use crate::rest::{
    paginate, resolve_index, BaseRequest, ChangeLog, CollectionPage, CollectionRequest,
    PageStream, ResourceError, ResourceRequest, ResourceUrl, Segment,
};

/// A list or document library.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct List {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// List template type, e.g. `100` (generic list) or `106` (events).
    #[serde(default)]
    pub base_template: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_item_modified_date: Option<DateTime<Utc>>,
    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Properties of a list to create.
///
/// # Example
///
/// ```rust
/// use sharepoint_rest::rest::resources::ListCreationInformation;
///
/// let info = ListCreationInformation::new("Announcements", 104);
/// assert_eq!(
///     serde_json::to_value(&info).unwrap(),
///     serde_json::json!({"Title": "Announcements", "BaseTemplate": 104}),
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCreationInformation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_template: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_types_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_content_types: Option<bool>,
}

impl ListCreationInformation {
    /// Creates the minimal creation payload.
    #[must_use]
    pub fn new(title: impl Into<String>, base_template: i32) -> Self {
        Self {
            title: title.into(),
            base_template,
            ..Self::default()
        }
    }
}

/// Writable list properties. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

// ============================================================================
// Collection
// ============================================================================

/// Navigation step for the lists of a web.
#[derive(Clone, Debug)]
pub struct ListCollectionRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl ListCollectionRequestBuilder {
    pub(crate) const fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        Self { client, url }
    }

    /// Returns the collection URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Creates the request for this collection.
    #[must_use]
    pub fn request(&self) -> ListCollectionRequest {
        ListCollectionRequest {
            base: BaseRequest::new(Arc::clone(&self.client), self.url.clone()),
        }
    }
}

/// Request for the lists of a web.
#[derive(Clone, Debug)]
pub struct ListCollectionRequest {
    base: BaseRequest,
}

impl ResourceRequest for ListCollectionRequest {
    const NAME: &'static str = "List";

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl CollectionRequest for ListCollectionRequest {}

impl ListCollectionRequest {
    /// Fetches the first page of lists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not a list page.
    pub async fn get(&self) -> Result<CollectionPage<List>, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the first page of lists, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CollectionPage<List>, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }

    /// Streams every list, following continuation links lazily.
    #[must_use]
    pub fn stream(&self) -> PageStream<List> {
        self.stream_with_cancellation(&CancellationToken::new())
    }

    /// Streams every list; no page fetch starts after `cancel` fires.
    #[must_use]
    pub fn stream_with_cancellation(&self, cancel: &CancellationToken) -> PageStream<List> {
        paginate(
            self.base.clone(),
            HttpMethod::Get,
            None,
            Self::NAME,
            cancel.clone(),
        )
    }

    /// Creates a list and returns it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the list.
    pub async fn add(&self, info: &ListCreationInformation) -> Result<List, ResourceError> {
        self.add_with_cancellation(info, &CancellationToken::new())
            .await
    }

    /// Creates a list, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub async fn add_with_cancellation(
        &self,
        info: &ListCreationInformation,
        cancel: &CancellationToken,
    ) -> Result<List, ResourceError> {
        let body = to_body(info, "ListCreationInformation")?;
        self.base
            .send_json(HttpMethod::Post, Some(body), Self::NAME, cancel)
            .await
    }
}

// ============================================================================
// Single list
// ============================================================================

/// Navigation step for one list.
#[derive(Clone, Debug)]
pub struct ListRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl ListRequestBuilder {
    /// Resource name used in identifier errors.
    pub const NAME: &'static str = "List";

    pub(crate) const fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        Self { client, url }
    }

    /// Returns the list URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Navigates to the items of this list (`.../items`).
    #[must_use]
    pub fn items(&self) -> ListItemCollectionRequestBuilder {
        ListItemCollectionRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::Literal("items")),
        )
    }

    /// Navigates to one item by id (`.../items(<id>)`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] ("missing id") for id `0`.
    pub fn item(&self, id: u32) -> Result<ListItemRequestBuilder, ResourceError> {
        let index = resolve_index(id, ListItemRequestBuilder::NAME)?;
        Ok(ListItemRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::ByIndex {
                resource: "items",
                index,
            }),
        ))
    }

    /// Creates the request for this list.
    #[must_use]
    pub fn request(&self) -> ListRequest {
        ListRequest {
            base: BaseRequest::new(Arc::clone(&self.client), self.url.clone()),
        }
    }
}

/// Request for one list.
#[derive(Clone, Debug)]
pub struct ListRequest {
    base: BaseRequest,
}

impl ResourceRequest for ListRequest {
    const NAME: &'static str = "List";

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl ChangeLog for ListRequest {}

impl ListRequest {
    /// Fetches the list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not a list.
    pub async fn get(&self) -> Result<List, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the list, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<List, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }

    /// Updates list properties with a `PATCH`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the update.
    pub async fn update(&self, changes: &ListUpdate) -> Result<(), ResourceError> {
        self.update_with_cancellation(changes, &CancellationToken::new())
            .await
    }

    /// Updates the list, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn update_with_cancellation(
        &self,
        changes: &ListUpdate,
        cancel: &CancellationToken,
    ) -> Result<(), ResourceError> {
        let body = to_body(changes, Self::NAME)?;
        self.base
            .send_conditional(HttpMethod::Patch, Some(body), cancel)
            .await?;
        Ok(())
    }

    /// Deletes the list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the delete.
    pub async fn delete(&self) -> Result<(), ResourceError> {
        self.delete_with_cancellation(&CancellationToken::new())
            .await
    }

    /// Deletes the list, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`delete`](Self::delete).
    pub async fn delete_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), ResourceError> {
        self.base
            .send_conditional(HttpMethod::Delete, None, cancel)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_deserializes_list_response() {
        let list: List = serde_json::from_value(json!({
            "Id": "6f094ea6-2222-4f2e-b864-54f706f8b07a",
            "Title": "Events",
            "Description": "",
            "BaseTemplate": 106,
            "ItemCount": 3,
            "EnableVersioning": false
        }))
        .unwrap();

        assert_eq!(list.id.to_string(), "6f094ea6-2222-4f2e-b864-54f706f8b07a");
        assert_eq!(list.title, "Events");
        assert_eq!(list.description, "");
        assert_eq!(list.base_template, 106);
        assert_eq!(list.item_count, Some(3));
        assert_eq!(list.extra["EnableVersioning"], false);
    }

    #[test]
    fn test_list_update_omits_unset_fields() {
        let update = ListUpdate {
            hidden: Some(false),
            ..ListUpdate::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"Hidden": false}));
    }
}
