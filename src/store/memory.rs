//! In-memory ledger implementation
//!
//! Plain-map implementation of `LedgerStore` with the same semantics as the
//! PostgreSQL service (no-op updates on unknown ids, sequential request ids).
//! Used by the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::{Admin, Participant, RequestStatus, VisitRequest};
use crate::utils::errors::Result;

use super::LedgerStore;

#[derive(Default)]
struct Inner {
    participants: HashMap<i64, Participant>,
    admins: HashMap<i64, Admin>,
    requests: HashMap<i64, VisitRequest>,
    next_request_id: i64,
}

pub struct MemoryLedger {
    inner: Mutex<Inner>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_request_id: 1,
                ..Inner::default()
            }),
        }
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get_participant(&self, chat_id: i64) -> Result<Option<Participant>> {
        Ok(self.inner.lock().await.participants.get(&chat_id).cloned())
    }

    async fn upsert_participant(&self, participant: &Participant) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let mut record = participant.clone();
        if let Some(existing) = inner.participants.get(&participant.chat_id) {
            record.registered_at = existing.registered_at;
        }
        inner.participants.insert(participant.chat_id, record);
        Ok(())
    }

    async fn adjust_points(&self, chat_id: i64, delta: i32) -> Result<()> {
        if let Some(p) = self.inner.lock().await.participants.get_mut(&chat_id) {
            p.bonus_points += delta;
        }
        Ok(())
    }

    async fn increment_games(&self, chat_id: i64) -> Result<()> {
        if let Some(p) = self.inner.lock().await.participants.get_mut(&chat_id) {
            p.games_played += 1;
        }
        Ok(())
    }

    async fn set_pending_flag(&self, chat_id: i64, pending: bool) -> Result<()> {
        if let Some(p) = self.inner.lock().await.participants.get_mut(&chat_id) {
            p.has_pending_request = pending;
        }
        Ok(())
    }

    async fn get_admin(&self, user_id: i64) -> Result<Option<Admin>> {
        Ok(self.inner.lock().await.admins.get(&user_id).cloned())
    }

    async fn list_admins(&self) -> Result<Vec<Admin>> {
        let mut admins: Vec<Admin> = self.inner.lock().await.admins.values().cloned().collect();
        admins.sort_by(|a, b| a.added_at.cmp(&b.added_at).then(a.user_id.cmp(&b.user_id)));
        Ok(admins)
    }

    async fn upsert_admin(&self, admin: &Admin) -> Result<()> {
        self.inner
            .lock()
            .await
            .admins
            .insert(admin.user_id, admin.clone());
        Ok(())
    }

    async fn delete_admin(&self, user_id: i64) -> Result<()> {
        self.inner.lock().await.admins.remove(&user_id);
        Ok(())
    }

    async fn create_visit_request(&self, chat_id: i64, username: Option<&str>) -> Result<i64> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_request_id;
        inner.next_request_id += 1;
        inner.requests.insert(
            id,
            VisitRequest {
                id,
                chat_id,
                username: username.map(str::to_string),
                requested_at: Utc::now(),
                status: RequestStatus::Pending,
                resolved_by: None,
                resolved_at: None,
            },
        );
        Ok(id)
    }

    async fn get_visit_request(&self, request_id: i64) -> Result<Option<VisitRequest>> {
        Ok(self.inner.lock().await.requests.get(&request_id).cloned())
    }

    async fn update_visit_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
        resolved_by: i64,
    ) -> Result<()> {
        if let Some(request) = self.inner.lock().await.requests.get_mut(&request_id) {
            request.status = status;
            request.resolved_by = Some(resolved_by);
            request.resolved_at = Some(Utc::now());
        }
        Ok(())
    }
}
