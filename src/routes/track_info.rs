use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dao::{models::TrackInfo, track_info::TrackInfoRepository},
    dto::{
        common::{MessageResponse, Pagination},
        track_info::{CreateTrackInfoRequest, TrackInfoWithDetails},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling song/artist credit links.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/track-info",
            get(list_track_info).post(create_track_info),
        )
        .route(
            "/api/track-info/{id}",
            get(get_track_info).delete(delete_track_info),
        )
        .route("/api/track-info/{id}/details", get(get_track_info_details))
}

/// List credit links with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/track-info",
    tag = "track-info",
    params(Pagination),
    responses((status = 200, description = "Credit links returned", body = [TrackInfo]))
)]
pub async fn list_track_info(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<TrackInfo>>, AppError> {
    let links = TrackInfoRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(links))
}

/// Fetch a single credit link.
#[utoipa::path(
    get,
    path = "/api/track-info/{id}",
    tag = "track-info",
    params(("id" = i64, Path, description = "Credit link identifier")),
    responses(
        (status = 200, description = "Credit link found", body = TrackInfo),
        (status = 404, description = "Credit link not found")
    )
)]
pub async fn get_track_info(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<TrackInfo>, AppError> {
    let link = TrackInfoRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("track info {id} not found")))?;
    Ok(Json(link))
}

/// Fetch a credit link joined to its song and artist.
#[utoipa::path(
    get,
    path = "/api/track-info/{id}/details",
    tag = "track-info",
    params(("id" = i64, Path, description = "Credit link identifier")),
    responses(
        (status = 200, description = "Credit link with details", body = TrackInfoWithDetails),
        (status = 404, description = "Credit link not found")
    )
)]
pub async fn get_track_info_details(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<TrackInfoWithDetails>, AppError> {
    let link = TrackInfoRepository::new(&state.pool)
        .find_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("track info {id} not found")))?;
    Ok(Json(link))
}

/// Link a song to an artist. Linking the same pair twice returns the
/// original row.
#[utoipa::path(
    post,
    path = "/api/track-info",
    tag = "track-info",
    request_body = CreateTrackInfoRequest,
    responses((status = 200, description = "Credit link created or already present", body = TrackInfo))
)]
pub async fn create_track_info(
    State(state): State<SharedState>,
    Json(payload): Json<CreateTrackInfoRequest>,
) -> Result<Json<TrackInfo>, AppError> {
    let link = TrackInfoRepository::new(&state.pool)
        .create(&payload)
        .await?;
    Ok(Json(link))
}

/// Delete a credit link.
#[utoipa::path(
    delete,
    path = "/api/track-info/{id}",
    tag = "track-info",
    params(("id" = i64, Path, description = "Credit link identifier")),
    responses(
        (status = 200, description = "Credit link deleted", body = MessageResponse),
        (status = 404, description = "Credit link not found")
    )
)]
pub async fn delete_track_info(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = TrackInfoRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("track info {id} not found")));
    }
    Ok(Json(MessageResponse::new("track info deleted")))
}
