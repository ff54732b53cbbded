//! Site collection resource (`_api/site`).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::clients::{HttpClient, HttpMethod};
use crate::rest::resources::WebRequestBuilder;
use crate::rest::{BaseRequest, ChangeLog, ResourceError, ResourceRequest, ResourceUrl, Segment};

/// A site collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    pub id: Uuid,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_relative_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_site_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hub_site: Option<bool>,
    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Navigation step for a site collection.
#[derive(Clone, Debug)]
pub struct SiteRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl SiteRequestBuilder {
    pub(crate) const fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        Self { client, url }
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Navigates to the top-level web of the site (`site/rootWeb`).
    #[must_use]
    pub fn root_web(&self) -> WebRequestBuilder {
        WebRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::Literal("rootWeb")),
        )
    }

    /// Creates the request for this site.
    #[must_use]
    pub fn request(&self) -> SiteRequest {
        SiteRequest {
            base: BaseRequest::new(Arc::clone(&self.client), self.url.clone()),
        }
    }
}

/// Request for a site collection.
#[derive(Clone, Debug)]
pub struct SiteRequest {
    base: BaseRequest,
}

impl ResourceRequest for SiteRequest {
    const NAME: &'static str = "Site";

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl ChangeLog for SiteRequest {}

impl SiteRequest {
    /// Fetches the site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not a site.
    pub async fn get(&self) -> Result<Site, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the site, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Site, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }
}
