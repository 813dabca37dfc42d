use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{Role, RoundTeam},
        storage::StorageResult,
    },
    dto::round_team::{CreateRoundTeamRequest, UpdateRoundTeamRequest},
};

/// Data access for the `round_team` table.
pub struct RoundTeamRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RoundTeamRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List round teams with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<RoundTeam>> {
        let teams = sqlx::query_as::<_, RoundTeam>(
            "SELECT * FROM round_team ORDER BY round_team_id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;
        Ok(teams)
    }

    /// Fetch one team by id.
    pub async fn find(&self, round_team_id: i64) -> StorageResult<Option<RoundTeam>> {
        let team = sqlx::query_as::<_, RoundTeam>("SELECT * FROM round_team WHERE round_team_id = ?")
            .bind(round_team_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(team)
    }

    /// All teams of a round.
    pub async fn list_by_round(&self, round_id: i64) -> StorageResult<Vec<RoundTeam>> {
        let teams = sqlx::query_as::<_, RoundTeam>(
            "SELECT * FROM round_team WHERE round_id = ? ORDER BY round_team_id",
        )
        .bind(round_id)
        .fetch_all(self.pool)
        .await?;
        Ok(teams)
    }

    /// Insert a new team.
    pub async fn create(&self, request: &CreateRoundTeamRequest) -> StorageResult<RoundTeam> {
        let now = OffsetDateTime::now_utc();
        let team = sqlx::query_as::<_, RoundTeam>(
            r#"
            INSERT INTO round_team (round_id, role, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(request.round_id)
        .bind(request.role.unwrap_or(Role::Player))
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(team)
    }

    /// Apply a partial update; returns `None` when the team does not exist.
    pub async fn update(
        &self,
        round_team_id: i64,
        patch: &UpdateRoundTeamRequest,
    ) -> StorageResult<Option<RoundTeam>> {
        let Some(mut team) = self.find(round_team_id).await? else {
            return Ok(None);
        };

        if let Some(role) = patch.role {
            team.role = role;
        }
        team.updated_at = OffsetDateTime::now_utc();

        sqlx::query("UPDATE round_team SET role = ?, updated_at = ? WHERE round_team_id = ?")
            .bind(team.role)
            .bind(team.updated_at)
            .bind(round_team_id)
            .execute(self.pool)
            .await?;
        Ok(Some(team))
    }

    /// Delete a team; cascades to its player assignments.
    pub async fn delete(&self, round_team_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM round_team WHERE round_team_id = ?")
            .bind(round_team_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
