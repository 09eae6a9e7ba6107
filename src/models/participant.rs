//! Participant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A club member, keyed by their chat identifier. Created on first contact
/// and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub chat_id: i64,
    pub username: Option<String>,
    pub games_played: i32,
    /// Bonus balance. Administrators may adjust it in either direction and no
    /// floor is applied, so it can go negative.
    pub bonus_points: i32,
    pub registered_at: DateTime<Utc>,
    pub terms_accepted: bool,
    pub has_pending_request: bool,
}

impl Participant {
    /// Fresh record for a chat identifier seen for the first time.
    pub fn new(chat_id: i64, username: Option<String>) -> Self {
        Self {
            chat_id,
            username,
            games_played: 0,
            bonus_points: 0,
            registered_at: Utc::now(),
            terms_accepted: false,
            has_pending_request: false,
        }
    }
}
