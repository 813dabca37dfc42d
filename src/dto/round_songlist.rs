use serde::Deserialize;
use utoipa::ToSchema;

use crate::dao::models::ScoreType;

/// Payload for recording a song play within a round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoundSonglistRequest {
    /// Owning round.
    pub round_id: i64,
    /// Song that was played.
    pub song_id: i64,
    /// Team that guessed.
    pub round_team_id: i64,
    /// Credited song/artist pair.
    pub track_info_id: i64,
    /// The artist was guessed correctly.
    #[serde(default)]
    pub correct_artist_guess: Option<bool>,
    /// The title was guessed correctly.
    #[serde(default)]
    pub correct_song_title_guess: Option<bool>,
    /// The bonus movie question was answered correctly.
    #[serde(default)]
    pub bonus_correct_movie_guess: Option<bool>,
    /// Scoring mode; defaults to standard.
    #[serde(default)]
    pub score_type: Option<ScoreType>,
}

/// Partial update of a songlist entry's guess flags and scoring mode.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoundSonglistRequest {
    /// Updated artist-guess flag.
    pub correct_artist_guess: Option<bool>,
    /// Updated title-guess flag.
    pub correct_song_title_guess: Option<bool>,
    /// Updated bonus flag.
    pub bonus_correct_movie_guess: Option<bool>,
    /// Updated scoring mode.
    pub score_type: Option<ScoreType>,
}
