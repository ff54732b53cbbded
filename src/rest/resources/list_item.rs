//! List item resources (`.../items`, `.../items(<id>)`).
//!
//! Item columns differ per list, so item payloads are field maps keyed by
//! internal column name.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpMethod};
use crate::rest::{
    paginate, BaseRequest, CollectionPage, CollectionRequest, PageStream, ResourceError,
    ResourceRequest, ResourceUrl,
};

/// Column values keyed by internal field name.
pub type ListItemFields = Map<String, Value>;

/// An item in a list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListItem {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Remaining columns.
    #[serde(flatten)]
    pub fields: ListItemFields,
}

// ============================================================================
// Collection
// ============================================================================

/// Navigation step for the items of a list.
#[derive(Clone, Debug)]
pub struct ListItemCollectionRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl ListItemCollectionRequestBuilder {
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
    pub fn request(&self) -> ListItemCollectionRequest {
        ListItemCollectionRequest {
            base: BaseRequest::new(Arc::clone(&self.client), self.url.clone()),
        }
    }
}

/// Request for the items of a list.
#[derive(Clone, Debug)]
pub struct ListItemCollectionRequest {
    base: BaseRequest,
}

impl ResourceRequest for ListItemCollectionRequest {
    const NAME: &'static str = "ListItem";

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl CollectionRequest for ListItemCollectionRequest {}

impl ListItemCollectionRequest {
    /// Fetches the first page of items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not an item page.
    pub async fn get(&self) -> Result<CollectionPage<ListItem>, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the first page of items, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CollectionPage<ListItem>, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }

    /// Streams every item, following continuation links lazily.
    #[must_use]
    pub fn stream(&self) -> PageStream<ListItem> {
        self.stream_with_cancellation(&CancellationToken::new())
    }

    /// Streams every item; no page fetch starts after `cancel` fires.
    #[must_use]
    pub fn stream_with_cancellation(&self, cancel: &CancellationToken) -> PageStream<ListItem> {
        paginate(
            self.base.clone(),
            HttpMethod::Get,
            None,
            Self::NAME,
            cancel.clone(),
        )
    }

    /// Creates an item from column values and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the item.
    pub async fn add(&self, fields: &ListItemFields) -> Result<ListItem, ResourceError> {
        self.add_with_cancellation(fields, &CancellationToken::new())
            .await
    }

    /// Creates an item, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub async fn add_with_cancellation(
        &self,
        fields: &ListItemFields,
        cancel: &CancellationToken,
    ) -> Result<ListItem, ResourceError> {
        self.base
            .send_json(
                HttpMethod::Post,
                Some(Value::Object(fields.clone())),
                Self::NAME,
                cancel,
            )
            .await
    }
}

// ============================================================================
// Single item
// ============================================================================

/// Navigation step for one item.
#[derive(Clone, Debug)]
pub struct ListItemRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl ListItemRequestBuilder {
    /// Resource name used in identifier errors.
    pub const NAME: &'static str = "ListItem";

    pub(crate) const fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        Self { client, url }
    }

    /// Returns the item URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Creates the request for this item.
    #[must_use]
    pub fn request(&self) -> ListItemRequest {
        ListItemRequest {
            base: BaseRequest::new(Arc::clone(&self.client), self.url.clone()),
        }
    }
}

/// Request for one list item.
#[derive(Clone, Debug)]
pub struct ListItemRequest {
    base: BaseRequest,
}

impl ResourceRequest for ListItemRequest {
    const NAME: &'static str = "ListItem";

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl ListItemRequest {
    /// Fetches the item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not an item.
    pub async fn get(&self) -> Result<ListItem, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the item, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ListItem, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }

    /// Updates column values with a `PATCH`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the update.
    pub async fn update(&self, fields: &ListItemFields) -> Result<(), ResourceError> {
        self.update_with_cancellation(fields, &CancellationToken::new())
            .await
    }

    /// Updates the item, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn update_with_cancellation(
        &self,
        fields: &ListItemFields,
        cancel: &CancellationToken,
    ) -> Result<(), ResourceError> {
        self.base
            .send_conditional(HttpMethod::Patch, Some(Value::Object(fields.clone())), cancel)
            .await?;
        Ok(())
    }

    /// Deletes the item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the delete.
    pub async fn delete(&self) -> Result<(), ResourceError> {
        self.delete_with_cancellation(&CancellationToken::new())
            .await
    }

    /// Deletes the item, aborting when `cancel` fires.
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
    fn test_item_keeps_custom_columns() {
        let item: ListItem = serde_json::from_value(json!({
            "Id": 4,
            "Title": "Kickoff",
            "EventDate": "2024-05-01T09:00:00Z",
            "Location": "Room 1"
        }))
        .unwrap();

        assert_eq!(item.id, 4);
        assert_eq!(item.title.as_deref(), Some("Kickoff"));
        assert_eq!(item.fields["Location"], "Room 1");
        assert!(!item.fields.contains_key("Id"));
    }
}
