//! Web navigation (`web/navigation`).
//!
//! The response is a tree of [`NavigationNode`]s fetched in one round trip;
//! the request expands both menus so the whole tree arrives at once.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpMethod};
use crate::rest::{BaseRequest, ResourceError, ResourceRequest, ResourceUrl, EXPAND_OPTION};

/// Relations expanded on every navigation request.
pub const NAVIGATION_EXPAND: &[&str] = &["QuickLaunch", "TopNavigationBar"];

/// The navigation menus of a web.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Navigation {
    #[serde(default)]
    pub quick_launch: Vec<NavigationNode>,
    #[serde(default)]
    pub top_navigation_bar: Vec<NavigationNode>,
    /// `true` when the web inherits its parent's top navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_shared: Option<bool>,
}

/// One link in a navigation menu, with its child links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationNode {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    /// Returns the number of nodes in this subtree, including itself.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Navigation step for the navigation of a web.
#[derive(Clone, Debug)]
pub struct NavigationRequestBuilder {
    client: Arc<HttpClient>,
    url: ResourceUrl,
}

impl NavigationRequestBuilder {
    pub(crate) const fn new(client: Arc<HttpClient>, url: ResourceUrl) -> Self {
        Self { client, url }
    }

    /// Returns the navigation URL.
    #[must_use]
    pub const fn url(&self) -> &ResourceUrl {
        &self.url
    }

    /// Creates the request, expanding both menus.
    #[must_use]
    pub fn request(&self) -> NavigationRequest {
        let mut base = BaseRequest::new(Arc::clone(&self.client), self.url.clone());
        base.set_query_option(EXPAND_OPTION, NAVIGATION_EXPAND.join(","));
        NavigationRequest { base }
    }
}

/// Request for the navigation of a web.
#[derive(Clone, Debug)]
pub struct NavigationRequest {
    base: BaseRequest,
}

impl ResourceRequest for NavigationRequest {
    const NAME: &'static str = "Navigation";
    const REQUIRED_EXPAND: &'static [&'static str] = NAVIGATION_EXPAND;

    fn base(&self) -> &BaseRequest {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseRequest {
        &mut self.base
    }
}

impl NavigationRequest {
    /// Fetches the navigation tree.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or status failures and
    /// [`ResourceError::Serialization`] if the body is not a navigation tree.
    pub async fn get(&self) -> Result<Navigation, ResourceError> {
        self.get_with_cancellation(&CancellationToken::new()).await
    }

    /// Fetches the navigation tree, aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Navigation, ResourceError> {
        self.base
            .send_json(HttpMethod::Get, None, Self::NAME, cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_navigation_tree_deserializes_recursively() {
        let navigation: Navigation = serde_json::from_value(json!({
            "QuickLaunch": [
                {
                    "Id": 1031,
                    "Title": "Home",
                    "Url": "/sites/team",
                    "IsExternal": false,
                    "Children": [
                        {"Id": 1032, "Title": "Docs", "Url": "/sites/team/Shared Documents", "IsExternal": false},
                        {"Id": 1033, "Title": "Bing", "Url": "https://www.bing.com", "IsExternal": true}
                    ]
                }
            ],
            "UseShared": true
        }))
        .unwrap();

        assert_eq!(navigation.quick_launch.len(), 1);
        assert!(navigation.top_navigation_bar.is_empty());
        assert_eq!(navigation.use_shared, Some(true));

        let home = &navigation.quick_launch[0];
        assert_eq!(home.node_count(), 3);
        assert!(home.children[1].is_external);
        assert!(home.children[0].children.is_empty());
    }
}
