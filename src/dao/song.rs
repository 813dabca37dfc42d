use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{models::Song, storage::StorageResult},
    dto::song::{CreateSongRequest, UpdateSongRequest},
};

/// Data access for the `song` table.
pub struct SongRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SongRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List songs with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<Song>> {
        let songs =
            sqlx::query_as::<_, Song>("SELECT * FROM song ORDER BY song_id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(self.pool)
                .await?;
        Ok(songs)
    }

    /// Fetch one song by id.
    pub async fn find(&self, song_id: i64) -> StorageResult<Option<Song>> {
        let song = sqlx::query_as::<_, Song>("SELECT * FROM song WHERE song_id = ?")
            .bind(song_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(song)
    }

    /// Idempotent create keyed on the Spotify track id.
    ///
    /// An existing row is returned with its title refreshed instead of
    /// raising a duplicate error.
    pub async fn create(&self, request: &CreateSongRequest) -> StorageResult<Song> {
        let now = OffsetDateTime::now_utc();
        let song = sqlx::query_as::<_, Song>(
            r#"
            INSERT INTO song (spotify_id, title, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(spotify_id) DO UPDATE
                SET title = excluded.title, updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&request.spotify_id)
        .bind(&request.title)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(song)
    }

    /// Apply a partial update; returns `None` when the song does not exist.
    pub async fn update(
        &self,
        song_id: i64,
        patch: &UpdateSongRequest,
    ) -> StorageResult<Option<Song>> {
        let Some(mut song) = self.find(song_id).await? else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            song.title = title.clone();
        }
        song.updated_at = OffsetDateTime::now_utc();

        sqlx::query("UPDATE song SET title = ?, updated_at = ? WHERE song_id = ?")
            .bind(&song.title)
            .bind(song.updated_at)
            .bind(song_id)
            .execute(self.pool)
            .await?;
        Ok(Some(song))
    }

    /// Delete a song; cascades to its credits and songlist entries.
    pub async fn delete(&self, song_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM song WHERE song_id = ?")
            .bind(song_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::test_support::memory_pool;

    #[tokio::test]
    async fn create_upserts_on_spotify_id() {
        let pool = memory_pool().await;
        let repo = SongRepository::new(&pool);

        let first = repo
            .create(&CreateSongRequest {
                spotify_id: "4uLU6hMCjMI75M1A2tKUQC".into(),
                title: "Never Gonna Give You Up".into(),
            })
            .await
            .unwrap();
        let second = repo
            .create(&CreateSongRequest {
                spotify_id: "4uLU6hMCjMI75M1A2tKUQC".into(),
                title: "Never Gonna Give You Up (Remastered)".into(),
            })
            .await
            .unwrap();

        assert_eq!(first.song_id, second.song_id);
        assert_eq!(second.title, "Never Gonna Give You Up (Remastered)");
        assert_eq!(repo.list(0, 10).await.unwrap().len(), 1);
    }
}
