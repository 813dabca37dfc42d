use serde::Deserialize;
use utoipa::ToSchema;

/// Payload for assigning a participant to a round team.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoundTeamPlayerRequest {
    /// Target team.
    pub round_team_id: i64,
    /// Assigned participant.
    pub participant_id: i64,
}

/// Partial update of an assignment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoundTeamPlayerRequest {
    /// Move the assignment to another team.
    pub round_team_id: Option<i64>,
    /// Swap the assigned participant.
    pub participant_id: Option<i64>,
}
