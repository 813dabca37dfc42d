use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{models::Player, storage::StorageResult},
    dto::player::{CreatePlayerRequest, UpdatePlayerRequest},
};

/// Data access for the `player` table.
pub struct PlayerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PlayerRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List players with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<Player>> {
        let players =
            sqlx::query_as::<_, Player>("SELECT * FROM player ORDER BY player_id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(self.pool)
                .await?;
        Ok(players)
    }

    /// Fetch one player by id.
    pub async fn find(&self, player_id: i64) -> StorageResult<Option<Player>> {
        let player = sqlx::query_as::<_, Player>("SELECT * FROM player WHERE player_id = ?")
            .bind(player_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(player)
    }

    /// Insert a new player.
    pub async fn create(&self, request: &CreatePlayerRequest) -> StorageResult<Player> {
        let now = OffsetDateTime::now_utc();
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO player (name, image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(player)
    }

    /// Apply a partial update; returns `None` when the player does not exist.
    pub async fn update(
        &self,
        player_id: i64,
        patch: &UpdatePlayerRequest,
    ) -> StorageResult<Option<Player>> {
        let Some(mut player) = self.find(player_id).await? else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            player.name = name.clone();
        }
        if let Some(image_url) = &patch.image_url {
            player.image_url = Some(image_url.clone());
        }
        player.updated_at = OffsetDateTime::now_utc();

        sqlx::query("UPDATE player SET name = ?, image_url = ?, updated_at = ? WHERE player_id = ?")
            .bind(&player.name)
            .bind(&player.image_url)
            .bind(player.updated_at)
            .bind(player_id)
            .execute(self.pool)
            .await?;
        Ok(Some(player))
    }

    /// Delete a player; cascades to its participations. Returns whether a
    /// row was removed.
    pub async fn delete(&self, player_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM player WHERE player_id = ?")
            .bind(player_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
