use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    dao::models::{Game, Round},
    dto::participant::ParticipantWithPlayer,
};

/// Payload for creating a game. Every field is optional; a bare `{}` starts
/// an empty game at track index zero.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    /// Spotify playlist backing the game.
    #[serde(default)]
    pub playlist_id: Option<String>,
    /// Starting track position.
    #[serde(default)]
    pub current_track_index: Option<i64>,
    /// Participant acting as all-time DJ.
    #[serde(default)]
    pub all_time_dj_participant_id: Option<i64>,
    /// Game start time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub started_at: Option<OffsetDateTime>,
    /// Game end time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub ended_at: Option<OffsetDateTime>,
}

/// Partial update of a game; omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateGameRequest {
    /// New playlist reference.
    #[serde(default)]
    pub playlist_id: Option<String>,
    /// New track position.
    #[serde(default)]
    pub current_track_index: Option<i64>,
    /// New all-time DJ participant.
    #[serde(default)]
    pub all_time_dj_participant_id: Option<i64>,
    /// New start time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub started_at: Option<OffsetDateTime>,
    /// New end time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub ended_at: Option<OffsetDateTime>,
}

/// A game with its participants eagerly loaded.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameWithParticipants {
    /// The game itself.
    #[serde(flatten)]
    pub game: Game,
    /// Participants ordered by seat, with player details.
    pub participants: Vec<ParticipantWithPlayer>,
}

/// A game with participants and rounds eagerly loaded.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameFull {
    /// The game itself.
    #[serde(flatten)]
    pub game: Game,
    /// Participants ordered by seat, with player details.
    pub participants: Vec<ParticipantWithPlayer>,
    /// Rounds ordered by sequence number.
    pub rounds: Vec<Round>,
}
