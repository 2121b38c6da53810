//! Queue request model and lifecycle status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Queue request lifecycle status
///
/// The only valid transitions are open → accepted → completed. A request
/// never returns to an earlier status, and completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Posted and unclaimed
    Open,
    /// Claimed by exactly one queuer, not yet finished
    Accepted,
    /// Finished; terminal
    Completed,
}

impl RequestStatus {
    /// Canonical storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Completed => "completed",
        }
    }
}

/// Error returned when parsing an unknown status value
#[derive(Debug, Error)]
#[error("Unknown request status: {0}")]
pub struct ParseStatusError(pub String);

impl TryFrom<&str> for RequestStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "open" => Ok(RequestStatus::Open),
            "accepted" => Ok(RequestStatus::Accepted),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Queue request entity
///
/// `queuer_id` is null exactly while the request is open; the accepting
/// transition sets it once and it is never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub payment: f64,
    pub status: RequestStatus,
    pub queuer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// New queue request creation payload
#[derive(Debug, Clone)]
pub struct NewQueueRequest {
    pub requester_id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub payment: f64,
}

/// Projection of an open request for queuer discovery
#[derive(Debug, Clone, Serialize)]
pub struct OpenRequestSummary {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub payment: f64,
    pub created_at: DateTime<Utc>,
}
