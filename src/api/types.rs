//! REST API types for the signup page.
//!
//! camelCase on the wire so the page consumes responses without
//! renaming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::FieldErrors;
use crate::roster::RosterSnapshot;

/// Response for `GET /api/roster`: the current table plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    /// Status: "ready"
    pub status: String,

    /// Column names, in table order
    pub headers: Vec<String>,

    /// Data rows, each as wide as `headers`
    pub rows: Vec<Vec<String>>,

    /// Metadata about the snapshot
    pub metadata: RosterMetadata,
}

/// Snapshot provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterMetadata {
    pub source: String,
    pub encoding: String,
    pub row_count: usize,
    pub fetched_at: DateTime<Utc>,
}

impl From<&RosterSnapshot> for RosterResponse {
    fn from(snapshot: &RosterSnapshot) -> Self {
        RosterResponse {
            status: "ready".to_string(),
            headers: snapshot.table.headers.clone(),
            rows: snapshot.table.rows.clone(),
            metadata: RosterMetadata {
                source: snapshot.source.clone(),
                encoding: snapshot.encoding.clone(),
                row_count: snapshot.row_count(),
                fetched_at: snapshot.fetched_at,
            },
        }
    }
}

/// Response for `POST /api/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    /// Unique submission identifier
    pub submission_id: String,

    /// Status: "accepted" or "rejected"
    pub status: String,

    /// Field errors, present only on rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl SignupResponse {
    /// A valid submission was accepted.
    pub fn accepted(submission_id: Uuid) -> Self {
        Self {
            submission_id: submission_id.to_string(),
            status: "accepted".to_string(),
            errors: None,
        }
    }

    /// An invalid submission was rejected with per-field messages.
    pub fn rejected(errors: FieldErrors) -> Self {
        Self {
            submission_id: Uuid::new_v4().to_string(),
            status: "rejected".to_string(),
            errors: Some(errors),
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}
