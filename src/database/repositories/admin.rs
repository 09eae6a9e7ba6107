//! Administrator repository implementation

use sqlx::PgPool;

use crate::models::Admin;
use crate::utils::errors::ClubPassError;

#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a roster entry by user identifier
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Admin>, ClubPassError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT user_id, username, added_by, added_at FROM admins WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// List the full roster, oldest entry first
    pub async fn list(&self) -> Result<Vec<Admin>, ClubPassError> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT user_id, username, added_by, added_at FROM admins ORDER BY added_at, user_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(admins)
    }

    /// Insert or overwrite a roster entry
    pub async fn upsert(&self, admin: &Admin) -> Result<(), ClubPassError> {
        sqlx::query(
            r#"
            INSERT INTO admins (user_id, username, added_by, added_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET
                username = EXCLUDED.username,
                added_by = EXCLUDED.added_by,
                added_at = EXCLUDED.added_at
            "#,
        )
        .bind(admin.user_id)
        .bind(&admin.username)
        .bind(admin.added_by)
        .bind(admin.added_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a roster entry; deleting an unknown id is a no-op
    pub async fn delete(&self, user_id: i64) -> Result<(), ClubPassError> {
        sqlx::query("DELETE FROM admins WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
