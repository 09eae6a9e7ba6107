//! Visit request repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::{RequestStatus, VisitRequest};
use crate::utils::errors::ClubPassError;

#[derive(Debug, Clone)]
pub struct VisitRequestRepository {
    pool: PgPool,
}

impl VisitRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new pending request and return its assigned id
    pub async fn create(&self, chat_id: i64, username: Option<&str>) -> Result<i64, ClubPassError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO visit_requests (chat_id, username, requested_at, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(chat_id)
        .bind(username)
        .bind(Utc::now())
        .bind(RequestStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Find a request by id
    pub async fn find_by_id(&self, request_id: i64) -> Result<Option<VisitRequest>, ClubPassError> {
        let request = sqlx::query_as::<_, VisitRequest>(
            "SELECT id, chat_id, username, requested_at, status, resolved_by, resolved_at FROM visit_requests WHERE id = $1"
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Stamp a request with its terminal status and resolution metadata
    pub async fn update_status(
        &self,
        request_id: i64,
        status: RequestStatus,
        resolved_by: i64,
    ) -> Result<(), ClubPassError> {
        sqlx::query(
            "UPDATE visit_requests SET status = $2, resolved_by = $3, resolved_at = $4 WHERE id = $1"
        )
        .bind(request_id)
        .bind(status)
        .bind(resolved_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
