use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Payload for registering an artist; idempotent on the Spotify id.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateArtistRequest {
    /// Spotify artist id.
    #[validate(length(min = 1, max = 100))]
    pub spotify_id: String,
    /// Artist name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Partial update of an artist.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateArtistRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}
