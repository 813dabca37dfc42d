use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::{Participant, Player};

/// Payload for joining a player to a game.
///
/// Creation is idempotent per (game, player); a duplicate request returns the
/// already existing participant.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParticipantRequest {
    /// Target game.
    pub game_id: i64,
    /// Joining player.
    pub player_id: i64,
    /// Seat around the table.
    pub seat_number: i64,
}

/// Partial update of a participant.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateParticipantRequest {
    /// New seat number.
    pub seat_number: Option<i64>,
}

/// A participant with its player details joined in.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantWithPlayer {
    /// The participation row.
    #[serde(flatten)]
    pub participant: Participant,
    /// The underlying player.
    pub player: Player,
}
