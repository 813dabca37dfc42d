use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{models::Artist, storage::StorageResult},
    dto::artist::{CreateArtistRequest, UpdateArtistRequest},
};

/// Data access for the `artist` table.
pub struct ArtistRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArtistRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List artists with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<Artist>> {
        let artists =
            sqlx::query_as::<_, Artist>("SELECT * FROM artist ORDER BY artist_id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(self.pool)
                .await?;
        Ok(artists)
    }

    /// Fetch one artist by id.
    pub async fn find(&self, artist_id: i64) -> StorageResult<Option<Artist>> {
        let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artist WHERE artist_id = ?")
            .bind(artist_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(artist)
    }

    /// Idempotent create keyed on the Spotify artist id; refreshes the name
    /// of an existing row.
    pub async fn create(&self, request: &CreateArtistRequest) -> StorageResult<Artist> {
        let now = OffsetDateTime::now_utc();
        let artist = sqlx::query_as::<_, Artist>(
            r#"
            INSERT INTO artist (spotify_id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(spotify_id) DO UPDATE
                SET name = excluded.name, updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&request.spotify_id)
        .bind(&request.name)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(artist)
    }

    /// Apply a partial update; returns `None` when the artist does not exist.
    pub async fn update(
        &self,
        artist_id: i64,
        patch: &UpdateArtistRequest,
    ) -> StorageResult<Option<Artist>> {
        let Some(mut artist) = self.find(artist_id).await? else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            artist.name = name.clone();
        }
        artist.updated_at = OffsetDateTime::now_utc();

        sqlx::query("UPDATE artist SET name = ?, updated_at = ? WHERE artist_id = ?")
            .bind(&artist.name)
            .bind(artist.updated_at)
            .bind(artist_id)
            .execute(self.pool)
            .await?;
        Ok(Some(artist))
    }

    /// Delete an artist; cascades to its credits.
    pub async fn delete(&self, artist_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM artist WHERE artist_id = ?")
            .bind(artist_id)
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
        let repo = ArtistRepository::new(&pool);

        let first = repo
            .create(&CreateArtistRequest {
                spotify_id: "0gxyHStUsqpMadRV0Di1Qt".into(),
                name: "Rick Astley".into(),
            })
            .await
            .unwrap();
        let second = repo
            .create(&CreateArtistRequest {
                spotify_id: "0gxyHStUsqpMadRV0Di1Qt".into(),
                name: "RICK ASTLEY".into(),
            })
            .await
            .unwrap();

        assert_eq!(first.artist_id, second.artist_id);
        assert_eq!(second.name, "RICK ASTLEY");
        assert_eq!(repo.list(0, 10).await.unwrap().len(), 1);
    }
}
