//! Root client for the SharePoint REST API.
//!
//! This module provides the [`RestClient`] type, the starting point of every
//! navigation chain. It builds the shared [`HttpClient`] once and hands it to
//! every builder created from it.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::{ClientConfig, SiteUrl};
use crate::error::ConfigError;
use crate::rest::resources::ApiRequestBuilder;

/// Root client for the SharePoint REST API.
///
/// One client can address any number of sites; the site is chosen per call
/// to [`api`](Self::api).
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync` and cheap to clone; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use sharepoint_rest::{AccessToken, ClientConfig, RestClient, SiteUrl};
///
/// let config = ClientConfig::builder()
///     .access_token(AccessToken::new("eyJ0eXAi...")?)
///     .tries(3)
///     .build()?;
///
/// let client = RestClient::new(&config)?;
/// let site = SiteUrl::new("https://contoso.sharepoint.com/sites/team")?;
///
/// let web = client.api(&site).web().request().get().await?;
/// println!("{}", web.title);
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    http_client: Arc<HttpClient>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the transport cannot be
    /// initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(tries = config.tries(), "created SharePoint REST client");
        Ok(Self {
            http_client: Arc::new(http_client),
        })
    }

    /// Returns the REST service root (`<site>/_api`) of `site`.
    #[must_use]
    pub fn api(&self, site: &SiteUrl) -> ApiRequestBuilder {
        ApiRequestBuilder::new(Arc::clone(&self.http_client), site)
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;

    fn client() -> RestClient {
        let config = ClientConfig::builder()
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_api_appends_service_root() {
        let site = SiteUrl::new("https://contoso.sharepoint.com/sites/team/").unwrap();
        assert_eq!(
            client().api(&site).url().as_str(),
            "https://contoso.sharepoint.com/sites/team/_api"
        );
    }

    #[test]
    fn test_clones_share_http_client() {
        let original = client();
        let clone = original.clone();
        assert!(std::ptr::eq(original.http_client(), clone.http_client()));
    }

    #[test]
    fn test_one_client_addresses_many_sites() {
        let client = client();
        let a = SiteUrl::new("https://contoso.sharepoint.com/sites/a").unwrap();
        let b = SiteUrl::new("https://contoso.sharepoint.com/sites/b").unwrap();

        assert_ne!(client.api(&a).url(), client.api(&b).url());
    }
}
