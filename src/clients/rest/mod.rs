//! REST entry point.
//!
//! [`RestClient`] owns the shared [`HttpClient`](crate::clients::HttpClient)
//! and opens navigation chains with [`RestClient::api`]:
//!
//! ```rust,ignore
//! use sharepoint_rest::rest::ResourceRequest;
//!
//! let items = client
//!     .api(&site)
//!     .web()
//!     .list_by_title("Tasks")?
//!     .items()
//!     .request()
//!     .top(50)
//!     .get()
//!     .await?;
//! ```

mod client;

pub use client::RestClient;
