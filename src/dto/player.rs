use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Payload for registering a new player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlayerRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Relative URL of an uploaded avatar.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update of a player; omitted fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePlayerRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New avatar URL.
    pub image_url: Option<String>,
}
