//! Change-log queries (`GetChanges`).
//!
//! Sites, webs and lists keep a server-side log of mutations. A
//! [`ChangeQuery`] selects which change categories to include; it is posted
//! to `<resource>/GetChanges` as `{"query": {...}}` and the paged response is
//! walked lazily into a stream of [`Change`] records.
//!
//! # Flag presence
//!
//! Every flag is an `Option<bool>`. `None` is omitted from the body,
//! `Some(false)` is sent as `false`. An empty query is valid and posts
//! `{"query":{}}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures_util::TryStreamExt;
//! use sharepoint_rest::rest::{ChangeLog, ChangeQuery};
//!
//! let query = ChangeQuery {
//!     add: Some(true),
//!     item: Some(true),
//!     ..ChangeQuery::default()
//! };
//!
//! let mut changes = api.web().list_by_title("Events")?.request().get_changes(&query);
//! while let Some(change) = changes.try_next().await? {
//!     println!("{:?} at {:?}", change.change_type, change.time);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::clients::HttpMethod;
use crate::rest::request::to_body;
use crate::rest::{paginate, BaseRequest, PageStream, ResourceError, ResourceRequest};

/// Name of the change-log service operation.
pub const GET_CHANGES_OPERATION: &str = "GetChanges";

/// An opaque position in a change log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeToken {
    /// The serialized token, e.g. `1;3;<guid>;<ticks>;<sequence>`.
    pub string_value: String,
}

/// Categories and bounds of a change-log query.
///
/// Unset fields are omitted from the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_token_end: Option<ChangeToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_token_start: Option<ChangeToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_object: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_membership_add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_membership_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#move: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursive_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_security_trim: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_assignment_add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_assignment_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_definition_add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_definition_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_definition_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_policy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<bool>,
}

impl ChangeQuery {
    /// Returns the request body `{"query": {...}}` for this query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if the query cannot be encoded.
    pub fn to_body(&self) -> Result<Value, ResourceError> {
        Ok(json!({ "query": to_body(self, "ChangeQuery")? }))
    }
}

/// Kind of a tracked change, as reported by the server.
///
/// Codes the client does not know are kept in [`ChangeType::Unknown`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ChangeType {
    #[default]
    NoChange,
    Add,
    Update,
    DeleteObject,
    Rename,
    MoveAway,
    MoveInto,
    Restore,
    RoleAdd,
    RoleDelete,
    RoleUpdate,
    AssignmentAdd,
    AssignmentDelete,
    MemberAdd,
    MemberDelete,
    SystemUpdate,
    Navigation,
    ScopeAdd,
    ScopeDelete,
    ListContentTypeAdd,
    ListContentTypeDelete,
    Dirty,
    Activity,
    Unknown(i32),
}

impl From<i32> for ChangeType {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::NoChange,
            1 => Self::Add,
            2 => Self::Update,
            3 => Self::DeleteObject,
            4 => Self::Rename,
            5 => Self::MoveAway,
            6 => Self::MoveInto,
            7 => Self::Restore,
            8 => Self::RoleAdd,
            9 => Self::RoleDelete,
            10 => Self::RoleUpdate,
            11 => Self::AssignmentAdd,
            12 => Self::AssignmentDelete,
            13 => Self::MemberAdd,
            14 => Self::MemberDelete,
            15 => Self::SystemUpdate,
            16 => Self::Navigation,
            17 => Self::ScopeAdd,
            18 => Self::ScopeDelete,
            19 => Self::ListContentTypeAdd,
            20 => Self::ListContentTypeDelete,
            21 => Self::Dirty,
            22 => Self::Activity,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChangeType> for i32 {
    fn from(change_type: ChangeType) -> Self {
        match change_type {
            ChangeType::NoChange => 0,
            ChangeType::Add => 1,
            ChangeType::Update => 2,
            ChangeType::DeleteObject => 3,
            ChangeType::Rename => 4,
            ChangeType::MoveAway => 5,
            ChangeType::MoveInto => 6,
            ChangeType::Restore => 7,
            ChangeType::RoleAdd => 8,
            ChangeType::RoleDelete => 9,
            ChangeType::RoleUpdate => 10,
            ChangeType::AssignmentAdd => 11,
            ChangeType::AssignmentDelete => 12,
            ChangeType::MemberAdd => 13,
            ChangeType::MemberDelete => 14,
            ChangeType::SystemUpdate => 15,
            ChangeType::Navigation => 16,
            ChangeType::ScopeAdd => 17,
            ChangeType::ScopeDelete => 18,
            ChangeType::ListContentTypeAdd => 19,
            ChangeType::ListContentTypeDelete => 20,
            ChangeType::Dirty => 21,
            ChangeType::Activity => 22,
            ChangeType::Unknown(code) => code,
        }
    }
}

/// One record from a change log.
///
/// Properties specific to the change kind (e.g. `UniqueId` on item changes)
/// are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_token: Option<ChangeToken>,
    #[serde(default)]
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_id: Option<Uuid>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Issues `GetChanges` against an owning resource.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChangeLogRequest;

impl ChangeLogRequest {
    /// Resource name used in error values.
    pub const NAME: &'static str = "Change";

    /// Posts `query` to `<owner>/GetChanges` and walks every page.
    ///
    /// Nothing is sent until the stream is polled. Each call starts an
    /// independent walk.
    #[must_use]
    pub fn get_changes(
        owner: &BaseRequest,
        query: &ChangeQuery,
        cancel: CancellationToken,
    ) -> PageStream<Change> {
        let body = match query.to_body() {
            Ok(body) => body,
            Err(e) => {
                return Box::pin(futures_util::stream::once(async move { Err::<Change, _>(e) }));
            }
        };

        paginate(
            owner.operation(GET_CHANGES_OPERATION),
            HttpMethod::Post,
            Some(body),
            Self::NAME,
            cancel,
        )
    }
}

/// Adds `get_changes` to resources that keep a change log.
pub trait ChangeLog: ResourceRequest {
    /// Returns every change matching `query`, in server order.
    #[must_use]
    fn get_changes(&self, query: &ChangeQuery) -> PageStream<Change> {
        ChangeLogRequest::get_changes(self.base(), query, CancellationToken::new())
    }

    /// Like [`get_changes`](Self::get_changes), stopping when `cancel` fires.
    ///
    /// No page fetch starts after cancellation is observed.
    #[must_use]
    fn get_changes_with_cancellation(
        &self,
        query: &ChangeQuery,
        cancel: &CancellationToken,
    ) -> PageStream<Change> {
        ChangeLogRequest::get_changes(self.base(), query, cancel.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_body() {
        let body = ChangeQuery::default().to_body().unwrap();
        assert_eq!(body.to_string(), r#"{"query":{}}"#);
    }

    #[test]
    fn test_single_flag_body() {
        let query = ChangeQuery {
            add: Some(true),
            ..ChangeQuery::default()
        };
        assert_eq!(query.to_body().unwrap().to_string(), r#"{"query":{"Add":true}}"#);
    }

    #[test]
    fn test_explicit_false_is_sent() {
        let query = ChangeQuery {
            item: Some(true),
            delete_object: Some(false),
            ..ChangeQuery::default()
        };
        assert_eq!(
            query.to_body().unwrap(),
            json!({"query": {"Item": true, "DeleteObject": false}})
        );
    }

    #[test]
    fn test_tokens_and_limits_use_wire_names() {
        let query = ChangeQuery {
            r#move: Some(true),
            change_token_start: Some(ChangeToken {
                string_value: "1;3;abc;1;2".to_string(),
            }),
            fetch_limit: Some(100),
            ..ChangeQuery::default()
        };
        assert_eq!(
            query.to_body().unwrap(),
            json!({"query": {
                "Move": true,
                "ChangeTokenStart": {"StringValue": "1;3;abc;1;2"},
                "FetchLimit": 100
            }})
        );
    }

    #[test]
    fn test_change_type_round_trips_unknown_codes() {
        assert_eq!(ChangeType::from(1), ChangeType::Add);
        assert_eq!(ChangeType::from(99), ChangeType::Unknown(99));
        assert_eq!(i32::from(ChangeType::Unknown(99)), 99);
        assert_eq!(i32::from(ChangeType::Activity), 22);
    }

    #[test]
    fn test_deserialize_item_change() {
        let change: Change = serde_json::from_value(json!({
            "@odata.type": "#SP.ChangeItem",
            "ChangeToken": {"StringValue": "1;3;x;1;7"},
            "ChangeType": 2,
            "SiteId": "2f1f2d2e-0d0e-4d79-9f6b-1a7c4f1e5b0a",
            "Time": "2024-03-01T10:15:00Z",
            "ItemId": 12,
            "ListId": "6f094ea6-2222-4f2e-b864-54f706f8b07a",
            "UniqueId": "c1a0c4b1-3e2d-4f6a-9b8c-7d6e5f4a3b2c"
        }))
        .unwrap();

        assert_eq!(change.change_type, ChangeType::Update);
        assert_eq!(change.item_id, Some(12));
        assert_eq!(change.change_token.unwrap().string_value, "1;3;x;1;7");
        assert!(change.time.is_some());
        assert!(change.web_id.is_none());
        assert_eq!(change.extra["@odata.type"], "#SP.ChangeItem");
        assert!(change.extra.contains_key("UniqueId"));
    }
}
