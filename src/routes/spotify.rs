use axum::{
    Extension, Json, Router,
    extract::{Path, Query, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use serde_json::Value;

use crate::{
    dto::{
        common::MessageResponse,
        spotify::{
            AddTracksRequest, CreatePlaylistRequest, IdsQuery, LimitQuery, MarketQuery,
            PlaybackRequest, PlaylistTracksQuery, SearchQuery, ShuffleQuery, SpotifyAlbum,
            SpotifyArtist, SpotifyPlaylist, SpotifyTrack, SpotifyUser, TransferPlaybackRequest,
        },
    },
    error::AppError,
    services::spotify::SpotifyClient,
    state::SharedState,
};

/// Valid bearer token injected by [`require_token`] for every proxy handler.
#[derive(Clone)]
pub struct SpotifyToken(pub String);

/// Resolve a usable access token before the handler runs, refreshing it if
/// needed. Requests without stored credentials are rejected here with 401.
pub async fn require_token(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = state.spotify_auth.access_token().await?;
    request.extensions_mut().insert(SpotifyToken(token));
    Ok(next.run(request).await)
}

/// Routes proxying the Spotify Web API. Every route in this subtree runs
/// behind [`require_token`]; the auth flow itself lives elsewhere.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/api/spotify/me", get(current_user))
        .route("/api/spotify/users/{user_id}", get(user_profile))
        .route(
            "/api/spotify/users/{user_id}/playlists",
            post(create_playlist),
        )
        .route("/api/spotify/tracks", get(several_tracks))
        .route("/api/spotify/tracks/{id}", get(track))
        .route("/api/spotify/search", get(search_tracks))
        .route("/api/spotify/artists/{id}", get(artist))
        .route("/api/spotify/artists/{id}/albums", get(artist_albums))
        .route(
            "/api/spotify/artists/{id}/top-tracks",
            get(artist_top_tracks),
        )
        .route("/api/spotify/albums/{id}", get(album))
        .route("/api/spotify/albums/{id}/tracks", get(album_tracks))
        .route("/api/spotify/playlists/{id}", get(playlist))
        .route(
            "/api/spotify/playlists/{id}/tracks",
            get(playlist_tracks).post(add_tracks),
        )
        .route("/api/spotify/me/playlists", get(user_playlists))
        .route("/api/spotify/player", get(playback_state))
        .route(
            "/api/spotify/player/currently-playing",
            get(currently_playing),
        )
        .route("/api/spotify/player/recently-played", get(recently_played))
        .route("/api/spotify/player/devices", get(devices))
        .route("/api/spotify/player/play", put(start_playback))
        .route("/api/spotify/player/pause", put(pause_playback))
        .route("/api/spotify/player/next", post(skip_to_next))
        .route("/api/spotify/player/previous", post(skip_to_previous))
        .route("/api/spotify/player/shuffle", put(set_shuffle))
        .route("/api/spotify/player/transfer", put(transfer_playback))
        .route_layer(middleware::from_fn_with_state(state, require_token))
}

fn client<'a>(state: &'a SharedState, token: &'a SpotifyToken) -> SpotifyClient<'a> {
    SpotifyClient::new(&state.http, &state.config.api_base_url, &token.0)
}

/// Profile of the authorized Spotify account.
#[utoipa::path(
    get,
    path = "/api/spotify/me",
    tag = "spotify",
    responses(
        (status = 200, description = "Profile returned", body = SpotifyUser),
        (status = 401, description = "Authorization required")
    )
)]
pub async fn current_user(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<SpotifyUser>, AppError> {
    let user = client(&state, &token).current_user().await?;
    Ok(Json(user))
}

/// Public profile of any Spotify user.
#[utoipa::path(
    get,
    path = "/api/spotify/users/{user_id}",
    tag = "spotify",
    params(("user_id" = String, Path, description = "Spotify user id")),
    responses((status = 200, description = "Profile returned", body = SpotifyUser))
)]
pub async fn user_profile(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(user_id): Path<String>,
) -> Result<Json<SpotifyUser>, AppError> {
    let user = client(&state, &token).user_profile(&user_id).await?;
    Ok(Json(user))
}

/// A single track by Spotify id.
#[utoipa::path(
    get,
    path = "/api/spotify/tracks/{id}",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify track id")),
    responses((status = 200, description = "Track returned", body = SpotifyTrack))
)]
pub async fn track(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
) -> Result<Json<SpotifyTrack>, AppError> {
    let track = client(&state, &token).track(&id).await?;
    Ok(Json(track))
}

/// Several tracks by comma-separated ids.
#[utoipa::path(
    get,
    path = "/api/spotify/tracks",
    tag = "spotify",
    params(IdsQuery),
    responses((status = 200, description = "Tracks returned", body = [SpotifyTrack]))
)]
pub async fn several_tracks(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Query(query): Query<IdsQuery>,
) -> Result<Json<Vec<SpotifyTrack>>, AppError> {
    let ids: Vec<&str> = query.ids.split(',').map(str::trim).collect();
    let tracks = client(&state, &token).tracks(&ids).await?;
    Ok(Json(tracks))
}

/// Track search.
#[utoipa::path(
    get,
    path = "/api/spotify/search",
    tag = "spotify",
    params(SearchQuery),
    responses((status = 200, description = "Search results", body = [SpotifyTrack]))
)]
pub async fn search_tracks(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SpotifyTrack>>, AppError> {
    let tracks = client(&state, &token)
        .search_tracks(&query.q, query.limit)
        .await?;
    Ok(Json(tracks))
}

/// A single artist.
#[utoipa::path(
    get,
    path = "/api/spotify/artists/{id}",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify artist id")),
    responses((status = 200, description = "Artist returned", body = SpotifyArtist))
)]
pub async fn artist(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
) -> Result<Json<SpotifyArtist>, AppError> {
    let artist = client(&state, &token).artist(&id).await?;
    Ok(Json(artist))
}

/// An artist's albums.
#[utoipa::path(
    get,
    path = "/api/spotify/artists/{id}/albums",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify artist id"), LimitQuery),
    responses((status = 200, description = "Albums returned", body = [SpotifyAlbum]))
)]
pub async fn artist_albums(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SpotifyAlbum>>, AppError> {
    let albums = client(&state, &token)
        .artist_albums(&id, query.limit.unwrap_or(20))
        .await?;
    Ok(Json(albums))
}

/// An artist's top tracks for a market.
#[utoipa::path(
    get,
    path = "/api/spotify/artists/{id}/top-tracks",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify artist id"), MarketQuery),
    responses((status = 200, description = "Top tracks returned", body = [SpotifyTrack]))
)]
pub async fn artist_top_tracks(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<Vec<SpotifyTrack>>, AppError> {
    let market = query.market.as_deref().unwrap_or("US");
    let tracks = client(&state, &token).artist_top_tracks(&id, market).await?;
    Ok(Json(tracks))
}

/// A single album.
#[utoipa::path(
    get,
    path = "/api/spotify/albums/{id}",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify album id")),
    responses((status = 200, description = "Album returned", body = SpotifyAlbum))
)]
pub async fn album(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
) -> Result<Json<SpotifyAlbum>, AppError> {
    let album = client(&state, &token).album(&id).await?;
    Ok(Json(album))
}

/// An album's tracks.
#[utoipa::path(
    get,
    path = "/api/spotify/albums/{id}/tracks",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify album id"), LimitQuery),
    responses((status = 200, description = "Tracks returned", body = [SpotifyTrack]))
)]
pub async fn album_tracks(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SpotifyTrack>>, AppError> {
    let tracks = client(&state, &token)
        .album_tracks(&id, query.limit.unwrap_or(50))
        .await?;
    Ok(Json(tracks))
}

/// A single playlist.
#[utoipa::path(
    get,
    path = "/api/spotify/playlists/{id}",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify playlist id")),
    responses((status = 200, description = "Playlist returned", body = SpotifyPlaylist))
)]
pub async fn playlist(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
) -> Result<Json<SpotifyPlaylist>, AppError> {
    let playlist = client(&state, &token).playlist(&id).await?;
    Ok(Json(playlist))
}

/// A page of a playlist's tracks, passed through verbatim.
#[utoipa::path(
    get,
    path = "/api/spotify/playlists/{id}/tracks",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify playlist id"), PlaylistTracksQuery),
    responses((status = 200, description = "Playlist tracks page", body = Object))
)]
pub async fn playlist_tracks(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
    Query(query): Query<PlaylistTracksQuery>,
) -> Result<Json<Value>, AppError> {
    let page = client(&state, &token)
        .playlist_tracks(&id, query.offset, query.limit)
        .await?;
    Ok(Json(page))
}

/// The authorized user's playlists.
#[utoipa::path(
    get,
    path = "/api/spotify/me/playlists",
    tag = "spotify",
    params(LimitQuery),
    responses((status = 200, description = "Playlists returned", body = [SpotifyPlaylist]))
)]
pub async fn user_playlists(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SpotifyPlaylist>>, AppError> {
    let playlists = client(&state, &token)
        .user_playlists(query.limit.unwrap_or(20))
        .await?;
    Ok(Json(playlists))
}

/// Create a playlist on a user's account.
#[utoipa::path(
    post,
    path = "/api/spotify/users/{user_id}/playlists",
    tag = "spotify",
    params(("user_id" = String, Path, description = "Spotify user id")),
    request_body = CreatePlaylistRequest,
    responses((status = 200, description = "Playlist created", body = SpotifyPlaylist))
)]
pub async fn create_playlist(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(user_id): Path<String>,
    Json(payload): Json<CreatePlaylistRequest>,
) -> Result<Json<SpotifyPlaylist>, AppError> {
    let playlist = client(&state, &token)
        .create_playlist(&user_id, &payload.name, payload.public, &payload.description)
        .await?;
    Ok(Json(playlist))
}

/// Append tracks to a playlist. Plain ids are accepted and expanded to
/// track URIs.
#[utoipa::path(
    post,
    path = "/api/spotify/playlists/{id}/tracks",
    tag = "spotify",
    params(("id" = String, Path, description = "Spotify playlist id")),
    request_body = AddTracksRequest,
    responses((status = 200, description = "Tracks added", body = MessageResponse))
)]
pub async fn add_tracks(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Path(id): Path<String>,
    Json(payload): Json<AddTracksRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let uris: Vec<String> = payload
        .track_ids
        .iter()
        .map(|track_id| {
            if track_id.starts_with("spotify:") {
                track_id.clone()
            } else {
                format!("spotify:track:{track_id}")
            }
        })
        .collect();
    client(&state, &token).add_tracks_to_playlist(&id, &uris).await?;
    Ok(Json(MessageResponse::new("tracks added")))
}

/// Full playback state, passed through verbatim.
#[utoipa::path(
    get,
    path = "/api/spotify/player",
    tag = "spotify",
    responses((status = 200, description = "Playback state", body = Object))
)]
pub async fn playback_state(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<Value>, AppError> {
    let playback = client(&state, &token).playback_state().await?;
    Ok(Json(playback))
}

/// The track currently playing, if any.
#[utoipa::path(
    get,
    path = "/api/spotify/player/currently-playing",
    tag = "spotify",
    responses((status = 200, description = "Current track or null", body = Option<SpotifyTrack>))
)]
pub async fn currently_playing(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<Option<SpotifyTrack>>, AppError> {
    let track = client(&state, &token).currently_playing().await?;
    Ok(Json(track))
}

/// Recently played tracks.
#[utoipa::path(
    get,
    path = "/api/spotify/player/recently-played",
    tag = "spotify",
    params(LimitQuery),
    responses((status = 200, description = "Recent tracks returned", body = [SpotifyTrack]))
)]
pub async fn recently_played(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SpotifyTrack>>, AppError> {
    let tracks = client(&state, &token)
        .recently_played(query.limit.unwrap_or(20))
        .await?;
    Ok(Json(tracks))
}

/// Available playback devices, passed through verbatim.
#[utoipa::path(
    get,
    path = "/api/spotify/player/devices",
    tag = "spotify",
    responses((status = 200, description = "Devices returned", body = Object))
)]
pub async fn devices(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<Value>, AppError> {
    let devices = client(&state, &token).devices().await?;
    Ok(Json(devices))
}

/// Start or resume playback on the active device.
#[utoipa::path(
    put,
    path = "/api/spotify/player/play",
    tag = "spotify",
    request_body = PlaybackRequest,
    responses((status = 200, description = "Playback started", body = MessageResponse))
)]
pub async fn start_playback(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Json(payload): Json<PlaybackRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    client(&state, &token).start_playback(&payload).await?;
    Ok(Json(MessageResponse::new("playback started")))
}

/// Pause playback on the active device.
#[utoipa::path(
    put,
    path = "/api/spotify/player/pause",
    tag = "spotify",
    responses((status = 200, description = "Playback paused", body = MessageResponse))
)]
pub async fn pause_playback(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<MessageResponse>, AppError> {
    client(&state, &token).pause_playback().await?;
    Ok(Json(MessageResponse::new("playback paused")))
}

/// Skip to the next track.
#[utoipa::path(
    post,
    path = "/api/spotify/player/next",
    tag = "spotify",
    responses((status = 200, description = "Skipped forward", body = MessageResponse))
)]
pub async fn skip_to_next(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<MessageResponse>, AppError> {
    client(&state, &token).skip_to_next().await?;
    Ok(Json(MessageResponse::new("skipped to next track")))
}

/// Skip to the previous track.
#[utoipa::path(
    post,
    path = "/api/spotify/player/previous",
    tag = "spotify",
    responses((status = 200, description = "Skipped back", body = MessageResponse))
)]
pub async fn skip_to_previous(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
) -> Result<Json<MessageResponse>, AppError> {
    client(&state, &token).skip_to_previous().await?;
    Ok(Json(MessageResponse::new("skipped to previous track")))
}

/// Toggle shuffle on the active device.
#[utoipa::path(
    put,
    path = "/api/spotify/player/shuffle",
    tag = "spotify",
    params(ShuffleQuery),
    responses((status = 200, description = "Shuffle set", body = MessageResponse))
)]
pub async fn set_shuffle(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Query(query): Query<ShuffleQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    client(&state, &token).set_shuffle(query.state).await?;
    Ok(Json(MessageResponse::new("shuffle updated")))
}

/// Transfer playback to another device.
#[utoipa::path(
    put,
    path = "/api/spotify/player/transfer",
    tag = "spotify",
    request_body = TransferPlaybackRequest,
    responses((status = 200, description = "Playback transferred", body = MessageResponse))
)]
pub async fn transfer_playback(
    State(state): State<SharedState>,
    Extension(token): Extension<SpotifyToken>,
    Json(payload): Json<TransferPlaybackRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    client(&state, &token)
        .transfer_playback(&payload.device_ids, payload.play)
        .await?;
    Ok(Json(MessageResponse::new("playback transferred")))
}
