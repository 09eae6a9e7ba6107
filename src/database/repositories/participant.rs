//! Participant repository implementation

use sqlx::PgPool;

use crate::models::Participant;
use crate::utils::errors::ClubPassError;

#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a participant by chat identifier
    pub async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<Participant>, ClubPassError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT chat_id, username, games_played, bonus_points, registered_at, terms_accepted, has_pending_request FROM participants WHERE chat_id = $1"
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Insert or overwrite a participant row. The registration timestamp of
    /// an existing row is left untouched.
    pub async fn upsert(&self, participant: &Participant) -> Result<(), ClubPassError> {
        sqlx::query(
            r#"
            INSERT INTO participants (chat_id, username, games_played, bonus_points, registered_at, terms_accepted, has_pending_request)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (chat_id)
            DO UPDATE SET
                username = EXCLUDED.username,
                games_played = EXCLUDED.games_played,
                bonus_points = EXCLUDED.bonus_points,
                terms_accepted = EXCLUDED.terms_accepted,
                has_pending_request = EXCLUDED.has_pending_request
            "#,
        )
        .bind(participant.chat_id)
        .bind(&participant.username)
        .bind(participant.games_played)
        .bind(participant.bonus_points)
        .bind(participant.registered_at)
        .bind(participant.terms_accepted)
        .bind(participant.has_pending_request)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Adjust a participant's bonus balance by a signed delta
    pub async fn adjust_points(&self, chat_id: i64, delta: i32) -> Result<(), ClubPassError> {
        sqlx::query("UPDATE participants SET bonus_points = bonus_points + $2 WHERE chat_id = $1")
            .bind(chat_id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Increment a participant's games-played counter
    pub async fn increment_games(&self, chat_id: i64) -> Result<(), ClubPassError> {
        sqlx::query("UPDATE participants SET games_played = games_played + 1 WHERE chat_id = $1")
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Set or clear the outstanding-request flag
    pub async fn set_pending_flag(&self, chat_id: i64, pending: bool) -> Result<(), ClubPassError> {
        sqlx::query("UPDATE participants SET has_pending_request = $2 WHERE chat_id = $1")
            .bind(chat_id)
            .bind(pending)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
