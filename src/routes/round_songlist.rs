use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dao::{models::RoundSonglist, round_songlist::RoundSonglistRepository},
    dto::{
        common::{MessageResponse, Pagination},
        round_songlist::{CreateRoundSonglistRequest, UpdateRoundSonglistRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling per-round songlist entries and guess bookkeeping.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/round-songlists",
            get(list_entries).post(create_entry),
        )
        .route(
            "/api/round-songlists/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

/// List songlist entries with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/round-songlists",
    tag = "round-songlists",
    params(Pagination),
    responses((status = 200, description = "Entries returned", body = [RoundSonglist]))
)]
pub async fn list_entries(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<RoundSonglist>>, AppError> {
    let entries = RoundSonglistRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(entries))
}

/// Fetch a single songlist entry.
#[utoipa::path(
    get,
    path = "/api/round-songlists/{id}",
    tag = "round-songlists",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry found", body = RoundSonglist),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_entry(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<RoundSonglist>, AppError> {
    let entry = RoundSonglistRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("songlist entry {id} not found")))?;
    Ok(Json(entry))
}

/// Attach a song to a round.
#[utoipa::path(
    post,
    path = "/api/round-songlists",
    tag = "round-songlists",
    request_body = CreateRoundSonglistRequest,
    responses((status = 200, description = "Entry created", body = RoundSonglist))
)]
pub async fn create_entry(
    State(state): State<SharedState>,
    Json(payload): Json<CreateRoundSonglistRequest>,
) -> Result<Json<RoundSonglist>, AppError> {
    let entry = RoundSonglistRepository::new(&state.pool)
        .create(&payload)
        .await?;
    Ok(Json(entry))
}

/// Record guess outcomes or scoring changes on an entry.
#[utoipa::path(
    put,
    path = "/api/round-songlists/{id}",
    tag = "round-songlists",
    params(("id" = i64, Path, description = "Entry identifier")),
    request_body = UpdateRoundSonglistRequest,
    responses(
        (status = 200, description = "Entry updated", body = RoundSonglist),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_entry(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoundSonglistRequest>,
) -> Result<Json<RoundSonglist>, AppError> {
    let entry = RoundSonglistRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("songlist entry {id} not found")))?;
    Ok(Json(entry))
}

/// Remove a song from a round.
#[utoipa::path(
    delete,
    path = "/api/round-songlists/{id}",
    tag = "round-songlists",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn delete_entry(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = RoundSonglistRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("songlist entry {id} not found")));
    }
    Ok(Json(MessageResponse::new("songlist entry deleted")))
}
