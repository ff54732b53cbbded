//! Root of the navigation chain: `<site>/_api`.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::SiteUrl;
use crate::rest::resources::{SiteRequestBuilder, WebRequestBuilder};
use crate::rest::{ResourceUrl, Segment};

/// Service root segment appended to every site URL.
pub const API_SEGMENT: &str = "_api";

/// Builder for the REST service root of one site.
///
/// # Example
///
/// ```rust,ignore
/// let api = client.api(&SiteUrl::new("https://contoso.sharepoint.com/sites/team")?);
/// assert_eq!(api.url().as_str(), "https://contoso.sharepoint.com/sites/team/_api");
///
/// let web = api.web().request().get().await?;
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl ApiRequestBuilder {
    pub(crate) fn new(client: Arc<HttpClient>, site: &SiteUrl) -> Self {
        let url = ResourceUrl::new(site.to_string()).append(&Segment::Literal(API_SEGMENT));
        Self { client, url }
    }

    /// Returns the service root URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Navigates to the site collection (`_api/site`).
    #[must_use]
    pub fn site(&self) -> SiteRequestBuilder {
        SiteRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::Literal("site")),
        )
    }

    /// Navigates to the web addressed by the site URL (`_api/web`).
    #[must_use]
    pub fn web(&self) -> WebRequestBuilder {
        WebRequestBuilder::new(
            Arc::clone(&self.client),
            self.url.append(&Segment::Literal("web")),
        )
    }
}
