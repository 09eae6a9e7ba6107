//! Administrator roster service
//!
//! Resolves whether a participant identifier carries administrator rights and
//! manages the roster itself. Additions are idempotent upserts; removals are
//! unconditional and may leave the roster empty — there is no self-removal or
//! last-admin protection, and the first entry is seeded operator-side.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::models::Admin;
use crate::store::LedgerStore;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn LedgerStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Pure roster lookup, no side effects.
    pub async fn is_admin(&self, user_id: i64) -> Result<bool> {
        Ok(self.store.get_admin(user_id).await?.is_some())
    }

    /// The full roster, ordered by addition time. Used for display and as the
    /// fan-out target list.
    pub async fn list_admins(&self) -> Result<Vec<Admin>> {
        self.store.list_admins().await
    }

    /// Idempotent upsert: re-adding an existing administrator overwrites the
    /// handle, the adding admin and the timestamp.
    pub async fn add_admin(
        &self,
        user_id: i64,
        username: Option<String>,
        added_by: i64,
    ) -> Result<()> {
        self.store
            .upsert_admin(&Admin {
                user_id,
                username,
                added_by,
                added_at: Utc::now(),
            })
            .await?;
        info!(admin_id = user_id, added_by = added_by, "Administrator added");
        Ok(())
    }

    /// Unconditional delete; removing an unknown identifier is a no-op.
    pub async fn remove_admin(&self, user_id: i64) -> Result<()> {
        self.store.delete_admin(user_id).await?;
        info!(admin_id = user_id, "Administrator removed");
        Ok(())
    }
}
