use serde::Serialize;
use utoipa::ToSchema;

/// Location of a stored upload, relative to the static image mount.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Relative URL to store on the player.
    pub url: String,
}
