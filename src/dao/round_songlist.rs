use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{RoundSonglist, ScoreType},
        storage::StorageResult,
    },
    dto::round_songlist::{CreateRoundSonglistRequest, UpdateRoundSonglistRequest},
};

/// Data access for the `round_songlist` table.
pub struct RoundSonglistRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RoundSonglistRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List songlist entries with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<RoundSonglist>> {
        let entries = sqlx::query_as::<_, RoundSonglist>(
            "SELECT * FROM round_songlist ORDER BY round_songlist_id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;
        Ok(entries)
    }

    /// Fetch one entry by id.
    pub async fn find(&self, round_songlist_id: i64) -> StorageResult<Option<RoundSonglist>> {
        let entry = sqlx::query_as::<_, RoundSonglist>(
            "SELECT * FROM round_songlist WHERE round_songlist_id = ?",
        )
        .bind(round_songlist_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(entry)
    }

    /// All entries of a round.
    pub async fn list_by_round(&self, round_id: i64) -> StorageResult<Vec<RoundSonglist>> {
        let entries = sqlx::query_as::<_, RoundSonglist>(
            "SELECT * FROM round_songlist WHERE round_id = ? ORDER BY round_songlist_id",
        )
        .bind(round_id)
        .fetch_all(self.pool)
        .await?;
        Ok(entries)
    }

    /// Insert a new entry.
    pub async fn create(
        &self,
        request: &CreateRoundSonglistRequest,
    ) -> StorageResult<RoundSonglist> {
        let now = OffsetDateTime::now_utc();
        let entry = sqlx::query_as::<_, RoundSonglist>(
            r#"
            INSERT INTO round_songlist (
                round_id, song_id, round_team_id, track_info_id,
                correct_artist_guess, correct_song_title_guess, bonus_correct_movie_guess,
                score_type, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(request.round_id)
        .bind(request.song_id)
        .bind(request.round_team_id)
        .bind(request.track_info_id)
        .bind(request.correct_artist_guess.unwrap_or(false))
        .bind(request.correct_song_title_guess.unwrap_or(false))
        .bind(request.bonus_correct_movie_guess.unwrap_or(false))
        .bind(request.score_type.unwrap_or(ScoreType::Standard))
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(entry)
    }

    /// Apply a partial update; returns `None` when the entry does not exist.
    pub async fn update(
        &self,
        round_songlist_id: i64,
        patch: &UpdateRoundSonglistRequest,
    ) -> StorageResult<Option<RoundSonglist>> {
        let Some(mut entry) = self.find(round_songlist_id).await? else {
            return Ok(None);
        };

        if let Some(value) = patch.correct_artist_guess {
            entry.correct_artist_guess = value;
        }
        if let Some(value) = patch.correct_song_title_guess {
            entry.correct_song_title_guess = value;
        }
        if let Some(value) = patch.bonus_correct_movie_guess {
            entry.bonus_correct_movie_guess = value;
        }
        if let Some(score_type) = patch.score_type {
            entry.score_type = score_type;
        }
        entry.updated_at = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            UPDATE round_songlist
            SET correct_artist_guess = ?, correct_song_title_guess = ?,
                bonus_correct_movie_guess = ?, score_type = ?, updated_at = ?
            WHERE round_songlist_id = ?
            "#,
        )
        .bind(entry.correct_artist_guess)
        .bind(entry.correct_song_title_guess)
        .bind(entry.bonus_correct_movie_guess)
        .bind(entry.score_type)
        .bind(entry.updated_at)
        .bind(round_songlist_id)
        .execute(self.pool)
        .await?;
        Ok(Some(entry))
    }

    /// Delete an entry. Returns whether a row was removed.
    pub async fn delete(&self, round_songlist_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM round_songlist WHERE round_songlist_id = ?")
            .bind(round_songlist_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
