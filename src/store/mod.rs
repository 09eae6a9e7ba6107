//! Ledger store interface
//!
//! The durable row store the services depend on: participant records, the
//! administrator roster and visit requests. `database::DatabaseService`
//! implements this over PostgreSQL; `MemoryLedger` backs the test suite.
//!
//! All lookups return `Result<Option<..>>` so a failed read is never
//! conflated with "record does not exist" — callers branch on the two cases
//! separately.

pub mod memory;

pub use memory::MemoryLedger;

use async_trait::async_trait;

use crate::models::{Admin, Participant, RequestStatus, VisitRequest};
use crate::utils::errors::Result;

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get_participant(&self, chat_id: i64) -> Result<Option<Participant>>;

    /// Insert or fully overwrite a participant row. The registration
    /// timestamp of an existing row is preserved.
    async fn upsert_participant(&self, participant: &Participant) -> Result<()>;

    /// Add `delta` (possibly negative) to a participant's bonus balance.
    /// No floor is applied; an unknown chat id is a no-op, matching the
    /// underlying UPDATE semantics.
    async fn adjust_points(&self, chat_id: i64, delta: i32) -> Result<()>;

    /// Increment a participant's games-played counter by one.
    async fn increment_games(&self, chat_id: i64) -> Result<()>;

    async fn set_pending_flag(&self, chat_id: i64, pending: bool) -> Result<()>;

    async fn get_admin(&self, user_id: i64) -> Result<Option<Admin>>;

    /// The full roster, ordered by addition time.
    async fn list_admins(&self) -> Result<Vec<Admin>>;

    async fn upsert_admin(&self, admin: &Admin) -> Result<()>;

    /// Delete a roster entry; unknown ids are a no-op.
    async fn delete_admin(&self, user_id: i64) -> Result<()>;

    /// Insert a new pending visit request and return its assigned id.
    async fn create_visit_request(&self, chat_id: i64, username: Option<&str>) -> Result<i64>;

    async fn get_visit_request(&self, request_id: i64) -> Result<Option<VisitRequest>>;

    /// Stamp a request with its terminal status, the resolving administrator
    /// and the resolution time.
    async fn update_visit_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
        resolved_by: i64,
    ) -> Result<()>;
}
