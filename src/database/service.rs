//! Database service layer
//!
//! High-level interface over the repositories. Implements `LedgerStore`, the
//! seam the services and the dispatcher depend on.

use async_trait::async_trait;

use crate::database::{
    AdminRepository, DatabasePool, ParticipantRepository, VisitRequestRepository,
};
use crate::models::{Admin, Participant, RequestStatus, VisitRequest};
use crate::store::LedgerStore;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub participants: ParticipantRepository,
    pub admins: AdminRepository,
    pub visit_requests: VisitRequestRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            participants: ParticipantRepository::new(pool.clone()),
            admins: AdminRepository::new(pool.clone()),
            visit_requests: VisitRequestRepository::new(pool),
        }
    }
}

#[async_trait]
impl LedgerStore for DatabaseService {
    async fn get_participant(&self, chat_id: i64) -> Result<Option<Participant>> {
        self.participants.find_by_chat_id(chat_id).await
    }

    async fn upsert_participant(&self, participant: &Participant) -> Result<()> {
        self.participants.upsert(participant).await
    }

    async fn adjust_points(&self, chat_id: i64, delta: i32) -> Result<()> {
        self.participants.adjust_points(chat_id, delta).await
    }

    async fn increment_games(&self, chat_id: i64) -> Result<()> {
        self.participants.increment_games(chat_id).await
    }

    async fn set_pending_flag(&self, chat_id: i64, pending: bool) -> Result<()> {
        self.participants.set_pending_flag(chat_id, pending).await
    }

    async fn get_admin(&self, user_id: i64) -> Result<Option<Admin>> {
        self.admins.find_by_user_id(user_id).await
    }

    async fn list_admins(&self) -> Result<Vec<Admin>> {
        self.admins.list().await
    }

    async fn upsert_admin(&self, admin: &Admin) -> Result<()> {
        self.admins.upsert(admin).await
    }

    async fn delete_admin(&self, user_id: i64) -> Result<()> {
        self.admins.delete(user_id).await
    }

    async fn create_visit_request(&self, chat_id: i64, username: Option<&str>) -> Result<i64> {
        self.visit_requests.create(chat_id, username).await
    }

    async fn get_visit_request(&self, request_id: i64) -> Result<Option<VisitRequest>> {
        self.visit_requests.find_by_id(request_id).await
    }

    async fn update_visit_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
        resolved_by: i64,
    ) -> Result<()> {
        self.visit_requests
            .update_status(request_id, status, resolved_by)
            .await
    }
}
