use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use validator::Validate;

use crate::{
    dao::{artist::ArtistRepository, models::Artist},
    dto::{
        artist::{CreateArtistRequest, UpdateArtistRequest},
        common::{MessageResponse, Pagination},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling the artist catalog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/artists", get(list_artists).post(create_artist))
        .route(
            "/api/artists/{id}",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
}

/// List artists with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/artists",
    tag = "artists",
    params(Pagination),
    responses((status = 200, description = "Artists returned", body = [Artist]))
)]
pub async fn list_artists(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Artist>>, AppError> {
    let artists = ArtistRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(artists))
}

/// Fetch a single artist.
#[utoipa::path(
    get,
    path = "/api/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist identifier")),
    responses(
        (status = 200, description = "Artist found", body = Artist),
        (status = 404, description = "Artist not found")
    )
)]
pub async fn get_artist(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Artist>, AppError> {
    let artist = ArtistRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id} not found")))?;
    Ok(Json(artist))
}

/// Register an artist by Spotify id. Registering a known id refreshes the
/// stored name and returns the existing row.
#[utoipa::path(
    post,
    path = "/api/artists",
    tag = "artists",
    request_body = CreateArtistRequest,
    responses((status = 200, description = "Artist created or refreshed", body = Artist))
)]
pub async fn create_artist(
    State(state): State<SharedState>,
    Json(payload): Json<CreateArtistRequest>,
) -> Result<Json<Artist>, AppError> {
    payload.validate()?;
    let artist = ArtistRepository::new(&state.pool).create(&payload).await?;
    Ok(Json(artist))
}

/// Apply a partial update to an artist.
#[utoipa::path(
    put,
    path = "/api/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist identifier")),
    request_body = UpdateArtistRequest,
    responses(
        (status = 200, description = "Artist updated", body = Artist),
        (status = 404, description = "Artist not found")
    )
)]
pub async fn update_artist(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArtistRequest>,
) -> Result<Json<Artist>, AppError> {
    payload.validate()?;
    let artist = ArtistRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id} not found")))?;
    Ok(Json(artist))
}

/// Delete an artist; cascades to track info rows.
#[utoipa::path(
    delete,
    path = "/api/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist identifier")),
    responses(
        (status = 200, description = "Artist deleted", body = MessageResponse),
        (status = 404, description = "Artist not found")
    )
)]
pub async fn delete_artist(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = ArtistRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("artist {id} not found")));
    }
    Ok(Json(MessageResponse::new("artist deleted")))
}
