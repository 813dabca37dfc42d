use sqlx::{QueryBuilder, SqlitePool};
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{Participant, Player},
        storage::StorageResult,
    },
    dto::participant::{CreateParticipantRequest, ParticipantWithPlayer, UpdateParticipantRequest},
};

/// Data access for the `participant` table.
pub struct ParticipantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ParticipantRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List participants with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT * FROM participant ORDER BY participant_id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;
        Ok(participants)
    }

    /// Fetch one participant by id.
    pub async fn find(&self, participant_id: i64) -> StorageResult<Option<Participant>> {
        let participant =
            sqlx::query_as::<_, Participant>("SELECT * FROM participant WHERE participant_id = ?")
                .bind(participant_id)
                .fetch_optional(self.pool)
                .await?;
        Ok(participant)
    }

    /// Fetch a participant together with its player details.
    pub async fn find_with_player(
        &self,
        participant_id: i64,
    ) -> StorageResult<Option<ParticipantWithPlayer>> {
        let Some(participant) = self.find(participant_id).await? else {
            return Ok(None);
        };
        let player = sqlx::query_as::<_, Player>("SELECT * FROM player WHERE player_id = ?")
            .bind(participant.player_id)
            .fetch_one(self.pool)
            .await?;
        Ok(Some(ParticipantWithPlayer {
            participant,
            player,
        }))
    }

    /// All participants of a game ordered by seat, with player details.
    pub async fn list_by_game(&self, game_id: i64) -> StorageResult<Vec<ParticipantWithPlayer>> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT * FROM participant WHERE game_id = ? ORDER BY seat_number",
        )
        .bind(game_id)
        .fetch_all(self.pool)
        .await?;

        if participants.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new("SELECT * FROM player WHERE player_id IN (");
        let mut separated = builder.separated(", ");
        for participant in &participants {
            separated.push_bind(participant.player_id);
        }
        builder.push(")");
        let players: Vec<Player> = builder.build_query_as().fetch_all(self.pool).await?;

        let joined = participants
            .into_iter()
            .filter_map(|participant| {
                let player = players
                    .iter()
                    .find(|player| player.player_id == participant.player_id)
                    .cloned()?;
                Some(ParticipantWithPlayer {
                    participant,
                    player,
                })
            })
            .collect();
        Ok(joined)
    }

    /// Idempotent create: at most one participant per (game, player) pair.
    ///
    /// A second create for the same pair returns the existing row untouched.
    pub async fn create(&self, request: &CreateParticipantRequest) -> StorageResult<Participant> {
        let now = OffsetDateTime::now_utc();
        sqlx::query(
            r#"
            INSERT INTO participant (game_id, player_id, seat_number, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(game_id, player_id) DO NOTHING
            "#,
        )
        .bind(request.game_id)
        .bind(request.player_id)
        .bind(request.seat_number)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let participant = sqlx::query_as::<_, Participant>(
            "SELECT * FROM participant WHERE game_id = ? AND player_id = ?",
        )
        .bind(request.game_id)
        .bind(request.player_id)
        .fetch_one(self.pool)
        .await?;
        Ok(participant)
    }

    /// Apply a partial update; returns `None` when the participant is absent.
    pub async fn update(
        &self,
        participant_id: i64,
        patch: &UpdateParticipantRequest,
    ) -> StorageResult<Option<Participant>> {
        let Some(mut participant) = self.find(participant_id).await? else {
            return Ok(None);
        };

        if let Some(seat_number) = patch.seat_number {
            participant.seat_number = seat_number;
        }
        participant.updated_at = OffsetDateTime::now_utc();

        sqlx::query("UPDATE participant SET seat_number = ?, updated_at = ? WHERE participant_id = ?")
            .bind(participant.seat_number)
            .bind(participant.updated_at)
            .bind(participant_id)
            .execute(self.pool)
            .await?;
        Ok(Some(participant))
    }

    /// Delete a participant. Returns whether a row was removed.
    pub async fn delete(&self, participant_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM participant WHERE participant_id = ?")
            .bind(participant_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::{game::GameRepository, player::PlayerRepository, test_support::memory_pool},
        dto::{game::CreateGameRequest, player::CreatePlayerRequest},
    };

    #[tokio::test]
    async fn create_is_idempotent_per_game_and_player() {
        let pool = memory_pool().await;

        let player = PlayerRepository::new(&pool)
            .create(&CreatePlayerRequest {
                name: "Carol".into(),
                image_url: None,
            })
            .await
            .unwrap();
        let game = GameRepository::new(&pool)
            .create(&CreateGameRequest::default())
            .await
            .unwrap();

        let repo = ParticipantRepository::new(&pool);
        let first = repo
            .create(&CreateParticipantRequest {
                game_id: game.game_id,
                player_id: player.player_id,
                seat_number: 1,
            })
            .await
            .unwrap();
        let second = repo
            .create(&CreateParticipantRequest {
                game_id: game.game_id,
                player_id: player.player_id,
                seat_number: 7,
            })
            .await
            .unwrap();

        assert_eq!(first.participant_id, second.participant_id);
        // The original seat assignment wins.
        assert_eq!(second.seat_number, 1);
        assert_eq!(repo.list(0, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_by_game_orders_by_seat() {
        let pool = memory_pool().await;
        let players = PlayerRepository::new(&pool);
        let repo = ParticipantRepository::new(&pool);
        let game = GameRepository::new(&pool)
            .create(&CreateGameRequest::default())
            .await
            .unwrap();

        for (name, seat) in [("Zoe", 3), ("Yann", 1), ("Xavier", 2)] {
            let player = players
                .create(&CreatePlayerRequest {
                    name: name.into(),
                    image_url: None,
                })
                .await
                .unwrap();
            repo.create(&CreateParticipantRequest {
                game_id: game.game_id,
                player_id: player.player_id,
                seat_number: seat,
            })
            .await
            .unwrap();
        }

        let listed = repo.list_by_game(game.game_id).await.unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.player.name.as_str()).collect();
        assert_eq!(names, ["Yann", "Xavier", "Zoe"]);
    }
}
