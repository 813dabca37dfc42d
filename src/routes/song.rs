use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use validator::Validate;

use crate::{
    dao::{models::Song, song::SongRepository},
    dto::{
        common::{MessageResponse, Pagination},
        song::{CreateSongRequest, UpdateSongRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling the song catalog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/songs", get(list_songs).post(create_song))
        .route(
            "/api/songs/{id}",
            get(get_song).put(update_song).delete(delete_song),
        )
}

/// List songs with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/songs",
    tag = "songs",
    params(Pagination),
    responses((status = 200, description = "Songs returned", body = [Song]))
)]
pub async fn list_songs(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Song>>, AppError> {
    let songs = SongRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(songs))
}

/// Fetch a single song.
#[utoipa::path(
    get,
    path = "/api/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song identifier")),
    responses(
        (status = 200, description = "Song found", body = Song),
        (status = 404, description = "Song not found")
    )
)]
pub async fn get_song(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Song>, AppError> {
    let song = SongRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("song {id} not found")))?;
    Ok(Json(song))
}

/// Register a song by Spotify id. Registering a known id refreshes the
/// stored title and returns the existing row.
#[utoipa::path(
    post,
    path = "/api/songs",
    tag = "songs",
    request_body = CreateSongRequest,
    responses((status = 200, description = "Song created or refreshed", body = Song))
)]
pub async fn create_song(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSongRequest>,
) -> Result<Json<Song>, AppError> {
    payload.validate()?;
    let song = SongRepository::new(&state.pool).create(&payload).await?;
    Ok(Json(song))
}

/// Apply a partial update to a song.
#[utoipa::path(
    put,
    path = "/api/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song identifier")),
    request_body = UpdateSongRequest,
    responses(
        (status = 200, description = "Song updated", body = Song),
        (status = 404, description = "Song not found")
    )
)]
pub async fn update_song(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSongRequest>,
) -> Result<Json<Song>, AppError> {
    payload.validate()?;
    let song = SongRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("song {id} not found")))?;
    Ok(Json(song))
}

/// Delete a song; cascades to track info and songlist entries.
#[utoipa::path(
    delete,
    path = "/api/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song identifier")),
    responses(
        (status = 200, description = "Song deleted", body = MessageResponse),
        (status = 404, description = "Song not found")
    )
)]
pub async fn delete_song(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = SongRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("song {id} not found")));
    }
    Ok(Json(MessageResponse::new("song deleted")))
}
