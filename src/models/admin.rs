//! Administrator model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A roster entry granting approval and roster-management rights.
///
/// Administrators are resolved independently of participants; an
/// administrator id does not need a participant row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub user_id: i64,
    pub username: Option<String>,
    /// Who added this administrator. The bootstrap entry may reference
    /// itself; the field is informational and never validated.
    pub added_by: i64,
    pub added_at: DateTime<Utc>,
}
