use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Payload for registering a song.
///
/// The Spotify id is the natural key: re-creating an existing song returns
/// the stored row with its title refreshed instead of erroring.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateSongRequest {
    /// Spotify track id.
    #[validate(length(min = 1, max = 100))]
    pub spotify_id: String,
    /// Track title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
}

/// Partial update of a song.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateSongRequest {
    /// New title.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
}
