use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{models::RoundTeamPlayer, storage::StorageResult},
    dto::round_team_player::{CreateRoundTeamPlayerRequest, UpdateRoundTeamPlayerRequest},
};

/// Data access for the `round_team_player` table.
pub struct RoundTeamPlayerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RoundTeamPlayerRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List assignments with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<RoundTeamPlayer>> {
        let rows = sqlx::query_as::<_, RoundTeamPlayer>(
            "SELECT * FROM round_team_player ORDER BY round_team_player_id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch one assignment by id.
    pub async fn find(&self, round_team_player_id: i64) -> StorageResult<Option<RoundTeamPlayer>> {
        let row = sqlx::query_as::<_, RoundTeamPlayer>(
            "SELECT * FROM round_team_player WHERE round_team_player_id = ?",
        )
        .bind(round_team_player_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// All assignments of a team.
    pub async fn list_by_team(&self, round_team_id: i64) -> StorageResult<Vec<RoundTeamPlayer>> {
        let rows = sqlx::query_as::<_, RoundTeamPlayer>(
            "SELECT * FROM round_team_player WHERE round_team_id = ? ORDER BY round_team_player_id",
        )
        .bind(round_team_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new assignment.
    pub async fn create(
        &self,
        request: &CreateRoundTeamPlayerRequest,
    ) -> StorageResult<RoundTeamPlayer> {
        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, RoundTeamPlayer>(
            r#"
            INSERT INTO round_team_player (round_team_id, participant_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(request.round_team_id)
        .bind(request.participant_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Apply a partial update; returns `None` when the assignment is absent.
    pub async fn update(
        &self,
        round_team_player_id: i64,
        patch: &UpdateRoundTeamPlayerRequest,
    ) -> StorageResult<Option<RoundTeamPlayer>> {
        let Some(mut row) = self.find(round_team_player_id).await? else {
            return Ok(None);
        };

        if let Some(round_team_id) = patch.round_team_id {
            row.round_team_id = round_team_id;
        }
        if let Some(participant_id) = patch.participant_id {
            row.participant_id = participant_id;
        }
        row.updated_at = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            UPDATE round_team_player
            SET round_team_id = ?, participant_id = ?, updated_at = ?
            WHERE round_team_player_id = ?
            "#,
        )
        .bind(row.round_team_id)
        .bind(row.participant_id)
        .bind(row.updated_at)
        .bind(round_team_player_id)
        .execute(self.pool)
        .await?;
        Ok(Some(row))
    }

    /// Delete an assignment. Returns whether a row was removed.
    pub async fn delete(&self, round_team_player_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM round_team_player WHERE round_team_player_id = ?")
            .bind(round_team_player_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
