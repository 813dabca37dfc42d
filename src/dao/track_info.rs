use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{Artist, Song, TrackInfo},
        storage::StorageResult,
    },
    dto::track_info::{CreateTrackInfoRequest, TrackInfoWithDetails},
};

/// Data access for the `track_info` table.
pub struct TrackInfoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TrackInfoRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List credits with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<TrackInfo>> {
        let infos = sqlx::query_as::<_, TrackInfo>(
            "SELECT * FROM track_info ORDER BY track_info_id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;
        Ok(infos)
    }

    /// Fetch one credit by id.
    pub async fn find(&self, track_info_id: i64) -> StorageResult<Option<TrackInfo>> {
        let info = sqlx::query_as::<_, TrackInfo>("SELECT * FROM track_info WHERE track_info_id = ?")
            .bind(track_info_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(info)
    }

    /// Fetch a credit together with the song and artist it joins.
    pub async fn find_with_details(
        &self,
        track_info_id: i64,
    ) -> StorageResult<Option<TrackInfoWithDetails>> {
        let Some(track_info) = self.find(track_info_id).await? else {
            return Ok(None);
        };
        let song = sqlx::query_as::<_, Song>("SELECT * FROM song WHERE song_id = ?")
            .bind(track_info.song_id)
            .fetch_one(self.pool)
            .await?;
        let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artist WHERE artist_id = ?")
            .bind(track_info.artist_id)
            .fetch_one(self.pool)
            .await?;
        Ok(Some(TrackInfoWithDetails {
            track_info,
            song,
            artist,
        }))
    }

    /// Idempotent create keyed on the (song, artist) pair.
    pub async fn create(&self, request: &CreateTrackInfoRequest) -> StorageResult<TrackInfo> {
        let now = OffsetDateTime::now_utc();
        sqlx::query(
            r#"
            INSERT INTO track_info (song_id, artist_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(song_id, artist_id) DO NOTHING
            "#,
        )
        .bind(request.song_id)
        .bind(request.artist_id)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let info = sqlx::query_as::<_, TrackInfo>(
            "SELECT * FROM track_info WHERE song_id = ? AND artist_id = ?",
        )
        .bind(request.song_id)
        .bind(request.artist_id)
        .fetch_one(self.pool)
        .await?;
        Ok(info)
    }

    /// Delete a credit. Returns whether a row was removed.
    pub async fn delete(&self, track_info_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM track_info WHERE track_info_id = ?")
            .bind(track_info_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::{artist::ArtistRepository, song::SongRepository, test_support::memory_pool},
        dto::{artist::CreateArtistRequest, song::CreateSongRequest},
    };

    #[tokio::test]
    async fn create_is_idempotent_per_song_and_artist() {
        let pool = memory_pool().await;
        let song = SongRepository::new(&pool)
            .create(&CreateSongRequest {
                spotify_id: "track-1".into(),
                title: "Song One".into(),
            })
            .await
            .unwrap();
        let artist = ArtistRepository::new(&pool)
            .create(&CreateArtistRequest {
                spotify_id: "artist-1".into(),
                name: "Artist One".into(),
            })
            .await
            .unwrap();

        let repo = TrackInfoRepository::new(&pool);
        let request = CreateTrackInfoRequest {
            song_id: song.song_id,
            artist_id: artist.artist_id,
        };
        let first = repo.create(&request).await.unwrap();
        let second = repo.create(&request).await.unwrap();

        assert_eq!(first.track_info_id, second.track_info_id);
        assert_eq!(repo.list(0, 10).await.unwrap().len(), 1);

        let details = repo
            .find_with_details(first.track_info_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.song.title, "Song One");
        assert_eq!(details.artist.name, "Artist One");
    }
}
