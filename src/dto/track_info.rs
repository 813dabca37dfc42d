use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::{Artist, Song, TrackInfo};

/// Payload for crediting an artist on a song; idempotent on the pair.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTrackInfoRequest {
    /// Credited song.
    pub song_id: i64,
    /// Credited artist.
    pub artist_id: i64,
}

/// A credit joined with its song and artist rows.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackInfoWithDetails {
    /// The credit itself.
    #[serde(flatten)]
    pub track_info: TrackInfo,
    /// The credited song.
    pub song: Song,
    /// The credited artist.
    pub artist: Artist,
}
