//! Lazy walk over paged collection responses.
//!
//! [`paginate`] turns a first request into a [`PageStream`]: a forward-only
//! stream of entities that fetches one page at a time, yields its items in
//! server order and then follows `@odata.nextLink` until no link remains.
//!
//! - Nothing is sent until the stream is first polled.
//! - Follow-up requests reuse the method, headers and body of the first one.
//! - Relative links are resolved against the `_api` service root; a link
//!   starting with `/` is resolved against the site origin.
//! - Cancellation is checked before every page fetch; a cancelled token ends
//!   the stream with [`HttpError::Cancelled`] and no further requests.
//! - The first failed page ends the stream after yielding the error; items
//!   already yielded stay valid.
//!
//! Each call to [`paginate`] starts a fresh walk; no continuation state is
//! shared between streams.

use std::pin::Pin;

use futures_util::Stream;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpError, HttpMethod};
use crate::rest::{BaseRequest, CollectionPage, ResourceError, ResourceUrl};

const SERVICE_ROOT_MARKER: &str = "/_api/";

/// A boxed stream of entities walked across pages.
pub type PageStream<T> = Pin<Box<dyn Stream<Item = Result<T, ResourceError>> + Send>>;

/// Walks every page starting at `base`, sending `method` with `body`.
///
/// `resource` names the entity type in serialization errors.
#[must_use]
pub fn paginate<T>(
    base: BaseRequest,
    method: HttpMethod,
    body: Option<Value>,
    resource: &'static str,
    cancel: CancellationToken,
) -> PageStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut next: Option<String> = None;
        let mut page_number: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                yield Err(ResourceError::from(HttpError::Cancelled));
                return;
            }

            let request = match next.as_deref() {
                None => base.to_http_request(method, body.clone()),
                Some(link) => {
                    let link = resolve_next_link(base.url(), link);
                    base.to_http_request_at(&link, method, body.clone())
                }
            };
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            page_number += 1;
            tracing::debug!(resource, page = page_number, url = %request.url, "fetching page");

            let response = match base.client().request(&request, &cancel).await {
                Ok(response) => response,
                Err(e) => {
                    yield Err(ResourceError::from(e));
                    return;
                }
            };

            let page: CollectionPage<T> = match response.json() {
                Ok(page) => page,
                Err(e) => {
                    yield Err(ResourceError::serialization(resource, e));
                    return;
                }
            };

            let (items, link) = page.into_parts();
            for item in items {
                yield Ok(item);
            }

            match link {
                Some(link) => next = Some(link),
                None => return,
            }
        }
    })
}

/// Turns a continuation link into an absolute URL.
///
/// Absolute links are returned unchanged. A link that cannot be joined is
/// also returned unchanged and rejected later by request validation.
fn resolve_next_link(resource: &ResourceUrl, link: &str) -> String {
    let url = resource.as_str();
    let root = match url.find(SERVICE_ROOT_MARKER) {
        Some(at) => &url[..at + SERVICE_ROOT_MARKER.len()],
        None => url,
    };
    Url::parse(root)
        .and_then(|root| root.join(link))
        .map_or_else(|_| link.to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> ResourceUrl {
        ResourceUrl::new(
            "https://contoso.sharepoint.com/sites/team/_api/web/lists/getByTitle('Tasks')/items",
        )
    }

    #[test]
    fn test_absolute_link_is_unchanged() {
        let link = "https://contoso.sharepoint.com/sites/team/_api/web/lists/getByTitle('Tasks')/items?%24skiptoken=Paged%3DTRUE";
        assert_eq!(resolve_next_link(&items(), link), link);
    }

    #[test]
    fn test_root_relative_link_uses_site_origin() {
        assert_eq!(
            resolve_next_link(
                &items(),
                "/sites/team/_api/web/lists/getByTitle('Tasks')/items?%24skiptoken=p2"
            ),
            "https://contoso.sharepoint.com/sites/team/_api/web/lists/getByTitle('Tasks')/items?%24skiptoken=p2"
        );
    }

    #[test]
    fn test_relative_link_uses_service_root() {
        assert_eq!(
            resolve_next_link(&items(), "web/lists/getByTitle('Tasks')/items?%24skiptoken=p2"),
            "https://contoso.sharepoint.com/sites/team/_api/web/lists/getByTitle('Tasks')/items?%24skiptoken=p2"
        );
    }
}
