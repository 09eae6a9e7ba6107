//! Visit request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a visit request. A request transitions exactly once
/// from `Pending` to a terminal state and is never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// A member's claim of a club visit awaiting administrator adjudication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VisitRequest {
    pub id: i64,
    pub chat_id: i64,
    /// Originator's handle at the time of the request.
    pub username: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub resolved_by: Option<i64>,
    pub resolved_at: Option<DateTime<Utc>>,
}
