//! Typed projections of Spotify Web API payloads plus the proxy request
//! bodies.
//!
//! The raw types mirror the fields this backend actually reads; everything
//! else in the upstream payload is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Artist entry embedded in tracks and albums.
#[derive(Debug, Deserialize)]
pub struct RawArtistRef {
    /// Artist name.
    pub name: String,
}

/// Follower counter wrapper.
#[derive(Debug, Default, Deserialize)]
pub struct RawFollowers {
    /// Total follower count.
    #[serde(default)]
    pub total: i64,
}

/// Album entry embedded in a track.
#[derive(Debug, Deserialize)]
pub struct RawAlbumRef {
    /// Album name.
    pub name: String,
}

/// Track payload as returned by the tracks, search and player endpoints.
#[derive(Debug, Deserialize)]
pub struct RawTrack {
    /// Spotify track id.
    pub id: String,
    /// Track title.
    pub name: String,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: i64,
    /// Popularity score (absent on simplified tracks).
    #[serde(default)]
    pub popularity: i64,
    /// Credited artists.
    #[serde(default)]
    pub artists: Vec<RawArtistRef>,
    /// Owning album (absent on album-tracks listings).
    #[serde(default)]
    pub album: Option<RawAlbumRef>,
}

/// Flattened track projection served to the frontend.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpotifyTrack {
    /// Spotify track id.
    pub id: String,
    /// Track title.
    pub name: String,
    /// Duration in milliseconds.
    pub duration_ms: i64,
    /// Popularity score.
    pub popularity: i64,
    /// Credited artist names.
    pub artists: Vec<String>,
    /// Album name, empty for simplified tracks.
    pub album: String,
}

impl From<RawTrack> for SpotifyTrack {
    fn from(raw: RawTrack) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            duration_ms: raw.duration_ms,
            popularity: raw.popularity,
            artists: raw.artists.into_iter().map(|artist| artist.name).collect(),
            album: raw.album.map(|album| album.name).unwrap_or_default(),
        }
    }
}

/// Artist payload from the artists endpoints.
#[derive(Debug, Deserialize)]
pub struct RawArtist {
    /// Spotify artist id.
    pub id: String,
    /// Artist name.
    pub name: String,
    /// Genre tags.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: i64,
    /// Follower counter.
    #[serde(default)]
    pub followers: RawFollowers,
}

/// Flattened artist projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpotifyArtist {
    /// Spotify artist id.
    pub id: String,
    /// Artist name.
    pub name: String,
    /// Genre tags.
    pub genres: Vec<String>,
    /// Popularity score.
    pub popularity: i64,
    /// Follower count.
    pub followers: i64,
}

impl From<RawArtist> for SpotifyArtist {
    fn from(raw: RawArtist) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            genres: raw.genres,
            popularity: raw.popularity,
            followers: raw.followers.total,
        }
    }
}

/// Album payload from the albums endpoints.
#[derive(Debug, Deserialize)]
pub struct RawAlbum {
    /// Spotify album id.
    pub id: String,
    /// Album name.
    pub name: String,
    /// Release date string as reported upstream.
    #[serde(default)]
    pub release_date: String,
    /// Number of tracks.
    #[serde(default)]
    pub total_tracks: i64,
    /// Credited artists.
    #[serde(default)]
    pub artists: Vec<RawArtistRef>,
}

/// Flattened album projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpotifyAlbum {
    /// Spotify album id.
    pub id: String,
    /// Album name.
    pub name: String,
    /// Release date string.
    pub release_date: String,
    /// Number of tracks.
    pub total_tracks: i64,
    /// Credited artist names.
    pub artists: Vec<String>,
}

impl From<RawAlbum> for SpotifyAlbum {
    fn from(raw: RawAlbum) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            release_date: raw.release_date,
            total_tracks: raw.total_tracks,
            artists: raw.artists.into_iter().map(|artist| artist.name).collect(),
        }
    }
}

/// Playlist owner wrapper.
#[derive(Debug, Default, Deserialize)]
pub struct RawPlaylistOwner {
    /// Owner display name.
    #[serde(default)]
    pub display_name: String,
}

/// Playlist track counter wrapper.
#[derive(Debug, Default, Deserialize)]
pub struct RawPlaylistTracks {
    /// Total tracks in the playlist.
    #[serde(default)]
    pub total: i64,
}

/// Playlist payload from the playlists endpoints.
#[derive(Debug, Deserialize)]
pub struct RawPlaylist {
    /// Spotify playlist id.
    pub id: String,
    /// Playlist name.
    pub name: String,
    /// Playlist description.
    #[serde(default)]
    pub description: Option<String>,
    /// Track counter.
    #[serde(default)]
    pub tracks: RawPlaylistTracks,
    /// Owner.
    #[serde(default)]
    pub owner: RawPlaylistOwner,
    /// Visibility flag.
    #[serde(default)]
    pub public: bool,
}

/// Flattened playlist projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpotifyPlaylist {
    /// Spotify playlist id.
    pub id: String,
    /// Playlist name.
    pub name: String,
    /// Playlist description.
    pub description: Option<String>,
    /// Total tracks in the playlist.
    pub tracks_total: i64,
    /// Owner display name.
    pub owner: String,
    /// Visibility flag.
    pub public: bool,
}

impl From<RawPlaylist> for SpotifyPlaylist {
    fn from(raw: RawPlaylist) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            tracks_total: raw.tracks.total,
            owner: raw.owner.display_name,
            public: raw.public,
        }
    }
}

/// User payload from the profile endpoints.
#[derive(Debug, Deserialize)]
pub struct RawUser {
    /// Spotify user id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// E-mail, only present with the right scopes.
    #[serde(default)]
    pub email: Option<String>,
    /// Follower counter.
    #[serde(default)]
    pub followers: RawFollowers,
    /// Country code.
    #[serde(default)]
    pub country: Option<String>,
}

/// Flattened user projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpotifyUser {
    /// Spotify user id.
    pub id: String,
    /// Display name, empty when unset.
    pub display_name: String,
    /// E-mail when available.
    pub email: Option<String>,
    /// Follower count.
    pub followers: i64,
    /// Country code when available.
    pub country: Option<String>,
}

impl From<RawUser> for SpotifyUser {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            display_name: raw.display_name.unwrap_or_default(),
            email: raw.email,
            followers: raw.followers.total,
            country: raw.country,
        }
    }
}

/// Body for starting or resuming playback.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlaybackRequest {
    /// Context URI (album/playlist) to play.
    #[serde(default)]
    pub context_uri: Option<String>,
    /// Explicit track URIs to play.
    #[serde(default)]
    pub uris: Option<Vec<String>>,
    /// Start position inside the track.
    #[serde(default)]
    pub position_ms: Option<i64>,
    /// Offset inside the context, passed through verbatim.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub offset: Option<Value>,
}

/// Body for creating a playlist on the current user's account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlaylistRequest {
    /// Playlist name.
    pub name: String,
    /// Visibility flag.
    #[serde(default = "default_public")]
    pub public: bool,
    /// Playlist description.
    #[serde(default)]
    pub description: String,
}

fn default_public() -> bool {
    true
}

/// Body for adding tracks to a playlist.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTracksRequest {
    /// Spotify track ids (not URIs).
    pub track_ids: Vec<String>,
}

/// Body for transferring playback to another device.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferPlaybackRequest {
    /// Target device ids; Spotify accepts exactly one.
    pub device_ids: Vec<String>,
    /// Start playing after the transfer.
    #[serde(default)]
    pub play: Option<bool>,
}

/// Query parameter for toggling shuffle.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShuffleQuery {
    /// Desired shuffle state.
    pub state: bool,
}

/// Comma-separated id list query.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdsQuery {
    /// Comma-separated Spotify ids.
    pub ids: String,
}

/// Track search query.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search terms.
    pub q: String,
    /// Maximum number of results.
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_search_limit() -> i64 {
    20
}

/// Optional item limit query.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Maximum number of results.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Market selector for top-tracks.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MarketQuery {
    /// ISO market code; defaults to US.
    #[serde(default)]
    pub market: Option<String>,
}

/// Pagination for playlist tracks.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlaylistTracksQuery {
    /// Number of items to skip.
    #[serde(default)]
    pub offset: i64,
    /// Maximum number of items.
    #[serde(default = "default_playlist_limit")]
    pub limit: i64,
}

fn default_playlist_limit() -> i64 {
    100
}

/// Response handing the consent-page URL to the frontend.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUrlResponse {
    /// Spotify consent page URL including state and scopes.
    pub auth_url: String,
}

/// Response carrying a usable access token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    /// Bearer token for the Spotify Web API.
    pub access_token: String,
}

/// Authorization status summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    /// A non-expired token is stored.
    pub authenticated: bool,
    /// Any token is stored at all.
    pub has_token: bool,
    /// Stored expiry timestamp, when present.
    pub expires_at: Option<String>,
}

/// Query parameters Spotify appends to the OAuth callback.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    /// Authorization code on success.
    #[serde(default)]
    pub code: Option<String>,
    /// Echoed state value.
    #[serde(default)]
    pub state: Option<String>,
    /// Error code when the user denied consent.
    #[serde(default)]
    pub error: Option<String>,
}
