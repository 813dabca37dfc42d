use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{Round, RoundTeam, Song},
        storage::StorageResult,
    },
    dto::round::{
        CreateRoundRequest, RoundSonglistWithSong, RoundTeamWithPlayers, RoundWithDetails,
        RoundWithTeams, UpdateRoundRequest,
    },
};

/// Data access for the `round` table.
pub struct RoundRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RoundRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List rounds with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<Round>> {
        let rounds =
            sqlx::query_as::<_, Round>("SELECT * FROM round ORDER BY round_id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(self.pool)
                .await?;
        Ok(rounds)
    }

    /// Fetch one round by id.
    pub async fn find(&self, round_id: i64) -> StorageResult<Option<Round>> {
        let round = sqlx::query_as::<_, Round>("SELECT * FROM round WHERE round_id = ?")
            .bind(round_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(round)
    }

    /// All rounds of a game ordered by sequence number.
    pub async fn list_by_game(&self, game_id: i64) -> StorageResult<Vec<Round>> {
        let rounds = sqlx::query_as::<_, Round>(
            "SELECT * FROM round WHERE game_id = ? ORDER BY round_number, round_id",
        )
        .bind(game_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rounds)
    }

    /// The first incomplete round of a game, or `None` when every round is
    /// done.
    pub async fn find_active_for_game(&self, game_id: i64) -> StorageResult<Option<Round>> {
        let round = sqlx::query_as::<_, Round>(
            r#"
            SELECT * FROM round
            WHERE game_id = ? AND is_complete = 0
            ORDER BY round_number, round_id
            LIMIT 1
            "#,
        )
        .bind(game_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(round)
    }

    /// Fetch a round with its teams and their player assignments.
    pub async fn find_with_teams(&self, round_id: i64) -> StorageResult<Option<RoundWithTeams>> {
        let Some(round) = self.find(round_id).await? else {
            return Ok(None);
        };
        let round_teams = self.teams_with_players(round_id).await?;
        Ok(Some(RoundWithTeams { round, round_teams }))
    }

    /// Fetch a round with teams and the songlist (each entry joined to its
    /// song).
    pub async fn find_with_details(&self, round_id: i64) -> StorageResult<Option<RoundWithDetails>> {
        let Some(round) = self.find(round_id).await? else {
            return Ok(None);
        };

        let round_teams = sqlx::query_as::<_, RoundTeam>(
            "SELECT * FROM round_team WHERE round_id = ? ORDER BY round_team_id",
        )
        .bind(round_id)
        .fetch_all(self.pool)
        .await?;

        let entries = sqlx::query_as::<_, crate::dao::models::RoundSonglist>(
            "SELECT * FROM round_songlist WHERE round_id = ? ORDER BY round_songlist_id",
        )
        .bind(round_id)
        .fetch_all(self.pool)
        .await?;

        let mut round_songlists = Vec::with_capacity(entries.len());
        for entry in entries {
            let song = sqlx::query_as::<_, Song>("SELECT * FROM song WHERE song_id = ?")
                .bind(entry.song_id)
                .fetch_one(self.pool)
                .await?;
            round_songlists.push(RoundSonglistWithSong { entry, song });
        }

        Ok(Some(RoundWithDetails {
            round,
            round_teams,
            round_songlists,
        }))
    }

    async fn teams_with_players(&self, round_id: i64) -> StorageResult<Vec<RoundTeamWithPlayers>> {
        let teams = sqlx::query_as::<_, RoundTeam>(
            "SELECT * FROM round_team WHERE round_id = ? ORDER BY round_team_id",
        )
        .bind(round_id)
        .fetch_all(self.pool)
        .await?;

        let mut result = Vec::with_capacity(teams.len());
        for team in teams {
            let round_team_players = sqlx::query_as::<_, crate::dao::models::RoundTeamPlayer>(
                "SELECT * FROM round_team_player WHERE round_team_id = ? ORDER BY round_team_player_id",
            )
            .bind(team.round_team_id)
            .fetch_all(self.pool)
            .await?;
            result.push(RoundTeamWithPlayers {
                team,
                round_team_players,
            });
        }
        Ok(result)
    }

    /// Insert a new round (incomplete by definition).
    pub async fn create(&self, request: &CreateRoundRequest) -> StorageResult<Round> {
        let now = OffsetDateTime::now_utc();
        let round = sqlx::query_as::<_, Round>(
            r#"
            INSERT INTO round (game_id, round_number, is_complete, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(request.game_id)
        .bind(request.round_number)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(round)
    }

    /// Apply a partial update; returns `None` when the round does not exist.
    pub async fn update(
        &self,
        round_id: i64,
        patch: &UpdateRoundRequest,
    ) -> StorageResult<Option<Round>> {
        let Some(mut round) = self.find(round_id).await? else {
            return Ok(None);
        };

        if let Some(round_number) = patch.round_number {
            round.round_number = round_number;
        }
        if let Some(is_complete) = patch.is_complete {
            round.is_complete = is_complete;
        }
        round.updated_at = OffsetDateTime::now_utc();

        sqlx::query(
            "UPDATE round SET round_number = ?, is_complete = ?, updated_at = ? WHERE round_id = ?",
        )
        .bind(round.round_number)
        .bind(round.is_complete)
        .bind(round.updated_at)
        .bind(round_id)
        .execute(self.pool)
        .await?;
        Ok(Some(round))
    }

    /// Delete a round; cascades to teams and songlist entries.
    pub async fn delete(&self, round_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM round WHERE round_id = ?")
            .bind(round_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::{game::GameRepository, test_support::memory_pool},
        dto::game::CreateGameRequest,
    };

    #[tokio::test]
    async fn active_round_is_first_incomplete_by_number() {
        let pool = memory_pool().await;
        let game = GameRepository::new(&pool)
            .create(&CreateGameRequest::default())
            .await
            .unwrap();
        let repo = RoundRepository::new(&pool);

        // Insert out of order on purpose.
        let third = repo
            .create(&CreateRoundRequest {
                game_id: game.game_id,
                round_number: 3,
            })
            .await
            .unwrap();
        let first = repo
            .create(&CreateRoundRequest {
                game_id: game.game_id,
                round_number: 1,
            })
            .await
            .unwrap();
        let second = repo
            .create(&CreateRoundRequest {
                game_id: game.game_id,
                round_number: 2,
            })
            .await
            .unwrap();

        let active = repo.find_active_for_game(game.game_id).await.unwrap().unwrap();
        assert_eq!(active.round_id, first.round_id);

        repo.update(
            first.round_id,
            &UpdateRoundRequest {
                round_number: None,
                is_complete: Some(true),
            },
        )
        .await
        .unwrap();

        let active = repo.find_active_for_game(game.game_id).await.unwrap().unwrap();
        assert_eq!(active.round_id, second.round_id);

        for id in [second.round_id, third.round_id] {
            repo.update(
                id,
                &UpdateRoundRequest {
                    round_number: None,
                    is_complete: Some(true),
                },
            )
            .await
            .unwrap();
        }
        assert!(repo.find_active_for_game(game.game_id).await.unwrap().is_none());
    }
}
