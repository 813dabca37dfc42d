use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::{Round, RoundSonglist, RoundTeam, RoundTeamPlayer, Song};

/// Payload for creating a round. New rounds are always incomplete.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoundRequest {
    /// Owning game.
    pub game_id: i64,
    /// Sequence number inside the game.
    pub round_number: i64,
}

/// Partial update of a round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoundRequest {
    /// New sequence number.
    pub round_number: Option<i64>,
    /// Mark the round complete (or reopen it).
    pub is_complete: Option<bool>,
}

/// A round team with its player assignments.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundTeamWithPlayers {
    /// The team itself.
    #[serde(flatten)]
    pub team: RoundTeam,
    /// Players assigned to the team for this round.
    pub round_team_players: Vec<RoundTeamPlayer>,
}

/// A round with its teams and their players.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundWithTeams {
    /// The round itself.
    #[serde(flatten)]
    pub round: Round,
    /// Teams with their player assignments.
    pub round_teams: Vec<RoundTeamWithPlayers>,
}

/// A songlist entry joined with the song that was played.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundSonglistWithSong {
    /// The scored entry.
    #[serde(flatten)]
    pub entry: RoundSonglist,
    /// The song that was played.
    pub song: Song,
}

/// A round with teams and songlist details.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundWithDetails {
    /// The round itself.
    #[serde(flatten)]
    pub round: Round,
    /// Teams of the round.
    pub round_teams: Vec<RoundTeam>,
    /// Scored song plays with song details.
    pub round_songlists: Vec<RoundSonglistWithSong>,
}
