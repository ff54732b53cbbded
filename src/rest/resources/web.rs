//! Web resource (`_api/web`, `_api/site/rootWeb`).
//!
//! A web is the entry point to lists and navigation. Lists can be addressed
//! by GUID or by title:
//!
//! ```rust,ignore
//! let web = api.web();
//!
//! let by_title = web.list_by_title("Events")?;
//! let by_id = web.list_by_id(list_id)?;
//! // Either form, decided by whether the value parses as a GUID:
//! let resolved = web.list("6f094ea6-2222-4f2e-b864-54f706f8b07a")?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::clients::{HttpClient, HttpMethod};
use crate::rest::request::to_body;
use crate::rest::resources::{
    ListCollectionRequestBuilder, ListRequestBuilder, NavigationRequestBuilder,
};
use crate::rest::{
    BaseRequest, ChangeLog, Identifier, ResourceError, ResourceRequest, ResourceUrl, Segment,
};

/// A web (site or subsite).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Web {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_relative_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_item_modified_date: Option<DateTime<Utc>>,
    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Writable web properties. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Navigation step for a web.
#[derive(Clone, Debug)]
pub struct WebRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl WebRequestBuilder {
    pub(crate) const fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        Self { client, url }
    }

    /// Returns the web URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Navigates to the lists of this web (`web/lists`).
    #[must_use]
    pub fn lists(&self) -> ListCollectionRequestBuilder {
        ListCollectionRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::Literal("lists")),
        )
    }

    /// Navigates to one list, addressed by GUID if `raw` parses as one and
    /// by title otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] for the nil GUID or a
    /// blank title. No request is sent.
    pub fn list(&self, raw: &str) -> Result<ListRequestBuilder, ResourceError> {
        let id = Identifier::resolve(raw, ListRequestBuilder::NAME)?;
        Ok(self.list_at(&id))
    }

    /// Navigates to one list by GUID (`web/lists('<guid>')`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] ("missing id") for the
    /// nil GUID.
    pub fn list_by_id(&self, id: Uuid) -> Result<ListRequestBuilder, ResourceError> {
        let id = Identifier::from_guid(id, ListRequestBuilder::NAME)?;
        Ok(self.list_at(&id))
    }

    /// Navigates to one list by title (`web/lists/getByTitle('<title>')`).
    ///
    /// The title is never parsed as a GUID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] ("missing title") for an
    /// empty or whitespace-only title.
    pub fn list_by_title(&self, title: &str) -> Result<ListRequestBuilder, ResourceError> {
        let id = Identifier::from_name(title, ListRequestBuilder::NAME)?;
        Ok(self.list_at(&id))
    }

    fn list_at(&self, id: &Identifier) -> ListRequestBuilder {
        ListRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&id.segment("lists", "getByTitle")),
        )
    }

    /// Navigates to the navigation structure of this web (`web/navigation`).
    #[must_use]
    pub fn navigation(&self) -> NavigationRequestBuilder {
        NavigationRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::Literal("navigation")),
        )
    }

    /// Creates the request for this web.
    #[must_use]
    pub fn request(&self) -> WebRequest {
        WebRequest {
            base: BaseRequest::new(Arc::clone(&self.client), self.url.clone()),
        }
    }
}

/// Request for a web.
#[derive(Clone, Debug)]
pub struct WebRequest {
    base: BaseRequest,
}

impl ResourceRequest for WebRequest {
    const NAME: &'static str = "Web";

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl ChangeLog for WebRequest {}

impl WebRequest {
    /// Fetches the web.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not a web.
    pub async fn get(&self) -> Result<Web, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the web, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Web, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }

    /// Updates the web with a `PATCH`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the server rejects the update.
    pub async fn update(&self, changes: &WebUpdate) -> Result<(), ResourceError> {
        self.update_with_cancellation(changes, &CancellationToken::new())
            .await
    }

    /// Updates the web, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn update_with_cancellation(
        &self,
        changes: &WebUpdate,
        cancel: &CancellationToken,
    ) -> Result<(), ResourceError> {
        let body = to_body(changes, Self::NAME)?;
        self.base
            .send_conditional(HttpMethod::Patch, Some(body), cancel)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_deserializes_with_unknown_properties() {
        let web: Web = serde_json::from_value(json!({
            "Id": "2f1f2d2e-0d0e-4d79-9f6b-1a7c4f1e5b0a",
            "Title": "Team",
            "Url": "https://contoso.sharepoint.com/sites/team",
            "WebTemplate": "STS",
            "Created": "2020-01-01T00:00:00Z",
            "AllowRssFeeds": true
        }))
        .unwrap();

        assert_eq!(web.title, "Team");
        assert_eq!(web.web_template.as_deref(), Some("STS"));
        assert!(web.created.is_some());
        assert_eq!(web.extra["AllowRssFeeds"], true);
    }

    #[test]
    fn test_web_update_omits_unset_fields() {
        let update = WebUpdate {
            title: Some("Renamed".to_string()),
            ..WebUpdate::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"Title": "Renamed"}));
    }
}
