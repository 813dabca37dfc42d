//! Row types shared between the repositories and the HTTP layer.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Role a team plays during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Regular guessing team.
    Player,
    /// Team currently picking the songs.
    Dj,
    /// Team allowed to steal a missed guess.
    Stealer,
}

/// How a songlist entry is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ScoreType {
    /// Points awarded to the guessing team.
    Standard,
    /// Points awarded to a stealing team.
    Steal,
}

/// A registered player.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Player {
    /// Surrogate identifier.
    pub player_id: i64,
    /// Display name.
    pub name: String,
    /// Relative URL of the uploaded avatar, if any.
    pub image_url: Option<String>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// A game session.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Game {
    /// Surrogate identifier.
    pub game_id: i64,
    /// Spotify playlist backing the game, if chosen.
    pub playlist_id: Option<String>,
    /// Position inside the playlist.
    pub current_track_index: i64,
    /// Participant acting as all-time DJ, if designated.
    pub all_time_dj_participant_id: Option<i64>,
    /// When the game started.
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub started_at: Option<OffsetDateTime>,
    /// When the game ended.
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub ended_at: Option<OffsetDateTime>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// A player's membership in one game.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Participant {
    /// Surrogate identifier.
    pub participant_id: i64,
    /// Owning game.
    pub game_id: i64,
    /// Linked player.
    pub player_id: i64,
    /// Seat around the table.
    pub seat_number: i64,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// One round of a game.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Round {
    /// Surrogate identifier.
    pub round_id: i64,
    /// Owning game.
    pub game_id: i64,
    /// Sequence number inside the game.
    pub round_number: i64,
    /// Whether the round has been played to completion.
    pub is_complete: bool,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// A team grouping within one round.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct RoundTeam {
    /// Surrogate identifier.
    pub round_team_id: i64,
    /// Owning round.
    pub round_id: i64,
    /// Role of the team for this round.
    pub role: Role,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// Assignment of a participant to a round team.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct RoundTeamPlayer {
    /// Surrogate identifier.
    pub round_team_player_id: i64,
    /// Owning team.
    pub round_team_id: i64,
    /// Assigned participant.
    pub participant_id: i64,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// A song known to the game, unique on its Spotify track id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Song {
    /// Surrogate identifier.
    pub song_id: i64,
    /// Spotify track id.
    pub spotify_id: String,
    /// Track title.
    pub title: String,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// An artist known to the game, unique on its Spotify artist id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Artist {
    /// Surrogate identifier.
    pub artist_id: i64,
    /// Spotify artist id.
    pub spotify_id: String,
    /// Artist name.
    pub name: String,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// Credit of an artist on a song.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct TrackInfo {
    /// Surrogate identifier.
    pub track_info_id: i64,
    /// Credited song.
    pub song_id: i64,
    /// Credited artist.
    pub artist_id: i64,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// One scored song-play event within a round.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct RoundSonglist {
    /// Surrogate identifier.
    pub round_songlist_id: i64,
    /// Owning round.
    pub round_id: i64,
    /// Song that was played.
    pub song_id: i64,
    /// Team that guessed.
    pub round_team_id: i64,
    /// Credited song/artist pair.
    pub track_info_id: i64,
    /// The artist was guessed correctly.
    pub correct_artist_guess: bool,
    /// The title was guessed correctly.
    pub correct_song_title_guess: bool,
    /// The bonus movie question was answered correctly.
    pub bonus_correct_movie_guess: bool,
    /// Standard or steal scoring.
    pub score_type: ScoreType,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

/// A generic admin-tunable key/value setting.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct GameplaySetting {
    /// Surrogate identifier.
    pub setting_id: i64,
    /// Unique key.
    pub key: String,
    /// String value.
    pub value: String,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last-update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}
