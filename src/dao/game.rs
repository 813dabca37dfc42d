use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{Game, Round},
        participant::ParticipantRepository,
        storage::StorageResult,
    },
    dto::game::{CreateGameRequest, GameFull, GameWithParticipants, UpdateGameRequest},
};

/// Data access for the `game` table.
pub struct GameRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GameRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List games with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<Game>> {
        let games =
            sqlx::query_as::<_, Game>("SELECT * FROM game ORDER BY game_id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(self.pool)
                .await?;
        Ok(games)
    }

    /// Fetch one game by id.
    pub async fn find(&self, game_id: i64) -> StorageResult<Option<Game>> {
        let game = sqlx::query_as::<_, Game>("SELECT * FROM game WHERE game_id = ?")
            .bind(game_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(game)
    }

    /// Fetch a game together with its participants and their player details.
    pub async fn find_with_participants(
        &self,
        game_id: i64,
    ) -> StorageResult<Option<GameWithParticipants>> {
        let Some(game) = self.find(game_id).await? else {
            return Ok(None);
        };
        let participants = ParticipantRepository::new(self.pool)
            .list_by_game(game_id)
            .await?;
        Ok(Some(GameWithParticipants { game, participants }))
    }

    /// Fetch a game with participants and rounds.
    pub async fn find_full(&self, game_id: i64) -> StorageResult<Option<GameFull>> {
        let Some(with_participants) = self.find_with_participants(game_id).await? else {
            return Ok(None);
        };
        let rounds = sqlx::query_as::<_, Round>(
            "SELECT * FROM round WHERE game_id = ? ORDER BY round_number, round_id",
        )
        .bind(game_id)
        .fetch_all(self.pool)
        .await?;
        Ok(Some(GameFull {
            game: with_participants.game,
            participants: with_participants.participants,
            rounds,
        }))
    }

    /// Insert a new game.
    pub async fn create(&self, request: &CreateGameRequest) -> StorageResult<Game> {
        let now = OffsetDateTime::now_utc();
        let game = sqlx::query_as::<_, Game>(
            r#"
            INSERT INTO game (
                playlist_id, current_track_index, all_time_dj_participant_id,
                started_at, ended_at, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&request.playlist_id)
        .bind(request.current_track_index.unwrap_or(0))
        .bind(request.all_time_dj_participant_id)
        .bind(request.started_at)
        .bind(request.ended_at)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(game)
    }

    /// Apply a partial update; returns `None` when the game does not exist.
    pub async fn update(
        &self,
        game_id: i64,
        patch: &UpdateGameRequest,
    ) -> StorageResult<Option<Game>> {
        let Some(mut game) = self.find(game_id).await? else {
            return Ok(None);
        };

        if let Some(playlist_id) = &patch.playlist_id {
            game.playlist_id = Some(playlist_id.clone());
        }
        if let Some(index) = patch.current_track_index {
            game.current_track_index = index;
        }
        if let Some(dj) = patch.all_time_dj_participant_id {
            game.all_time_dj_participant_id = Some(dj);
        }
        if let Some(started_at) = patch.started_at {
            game.started_at = Some(started_at);
        }
        if let Some(ended_at) = patch.ended_at {
            game.ended_at = Some(ended_at);
        }
        game.updated_at = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            UPDATE game
            SET playlist_id = ?, current_track_index = ?, all_time_dj_participant_id = ?,
                started_at = ?, ended_at = ?, updated_at = ?
            WHERE game_id = ?
            "#,
        )
        .bind(&game.playlist_id)
        .bind(game.current_track_index)
        .bind(game.all_time_dj_participant_id)
        .bind(game.started_at)
        .bind(game.ended_at)
        .bind(game.updated_at)
        .bind(game_id)
        .execute(self.pool)
        .await?;
        Ok(Some(game))
    }

    /// Delete a game; cascades to participants, rounds, teams and songlists.
    pub async fn delete(&self, game_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM game WHERE game_id = ?")
            .bind(game_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::{
            participant::ParticipantRepository, player::PlayerRepository, round::RoundRepository,
            test_support::memory_pool,
        },
        dto::{
            participant::CreateParticipantRequest, player::CreatePlayerRequest,
            round::CreateRoundRequest,
        },
    };

    #[tokio::test]
    async fn delete_cascades_to_participants_and_rounds() {
        let pool = memory_pool().await;

        let player = PlayerRepository::new(&pool)
            .create(&CreatePlayerRequest {
                name: "Alice".into(),
                image_url: None,
            })
            .await
            .unwrap();
        let game = GameRepository::new(&pool)
            .create(&CreateGameRequest::default())
            .await
            .unwrap();

        let participant = ParticipantRepository::new(&pool)
            .create(&CreateParticipantRequest {
                game_id: game.game_id,
                player_id: player.player_id,
                seat_number: 1,
            })
            .await
            .unwrap();
        let round = RoundRepository::new(&pool)
            .create(&CreateRoundRequest {
                game_id: game.game_id,
                round_number: 1,
            })
            .await
            .unwrap();

        assert!(GameRepository::new(&pool).delete(game.game_id).await.unwrap());

        let participants = ParticipantRepository::new(&pool)
            .find(participant.participant_id)
            .await
            .unwrap();
        assert!(participants.is_none());
        let rounds = RoundRepository::new(&pool).find(round.round_id).await.unwrap();
        assert!(rounds.is_none());
        // The player itself survives.
        assert!(
            PlayerRepository::new(&pool)
                .find(player.player_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn full_fetch_composes_participants_and_rounds() {
        let pool = memory_pool().await;
        let games = GameRepository::new(&pool);

        let player = PlayerRepository::new(&pool)
            .create(&CreatePlayerRequest {
                name: "Bob".into(),
                image_url: None,
            })
            .await
            .unwrap();
        let game = games.create(&CreateGameRequest::default()).await.unwrap();
        ParticipantRepository::new(&pool)
            .create(&CreateParticipantRequest {
                game_id: game.game_id,
                player_id: player.player_id,
                seat_number: 2,
            })
            .await
            .unwrap();
        RoundRepository::new(&pool)
            .create(&CreateRoundRequest {
                game_id: game.game_id,
                round_number: 1,
            })
            .await
            .unwrap();

        let full = games.find_full(game.game_id).await.unwrap().unwrap();
        assert_eq!(full.participants.len(), 1);
        assert_eq!(full.participants[0].player.name, "Bob");
        assert_eq!(full.rounds.len(), 1);
    }
}
