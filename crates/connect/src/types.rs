//! Wire types for the partner authority API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the remote authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
}

/// One event on the realtime change feed.
///
/// `record` carries the row for INSERT/UPDATE; `old_record` carries the
/// pre-delete row for DELETE. Both are flat string-keyed objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMessage {
    pub event_type: String,
    #[serde(default)]
    pub record: Option<Value>,
    #[serde(default)]
    pub old_record: Option<Value>,
}

/// A page of the change feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesResponse {
    pub cursor: u64,
    pub events: Vec<ChangeMessage>,
}

// --- Request bodies ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateInviteRequest {
    pub creator_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AcceptInviteRequest {
    pub code: String,
    pub acceptor_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CancelInviteRequest {
    pub code: String,
    pub creator_id: String,
}
