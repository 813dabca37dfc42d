use serde::Deserialize;
use utoipa::ToSchema;

use crate::dao::models::Role;

/// Payload for creating a round team.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoundTeamRequest {
    /// Owning round.
    pub round_id: i64,
    /// Team role; defaults to a regular player team.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Partial update of a round team.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoundTeamRequest {
    /// New role.
    pub role: Option<Role>,
}
