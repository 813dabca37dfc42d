use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use validator::Validate;

use crate::{
    dao::{models::Player, player::PlayerRepository},
    dto::{
        common::{MessageResponse, Pagination},
        player::{CreatePlayerRequest, UpdatePlayerRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling player management.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/players", get(list_players).post(create_player))
        .route(
            "/api/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
}

/// List players with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    params(Pagination),
    responses((status = 200, description = "Players returned", body = [Player]))
)]
pub async fn list_players(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Player>>, AppError> {
    let players = PlayerRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(players))
}

/// Fetch a single player.
#[utoipa::path(
    get,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player identifier")),
    responses(
        (status = 200, description = "Player found", body = Player),
        (status = 404, description = "Player not found")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Player>, AppError> {
    let player = PlayerRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {id} not found")))?;
    Ok(Json(player))
}

/// Create a player.
#[utoipa::path(
    post,
    path = "/api/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    responses((status = 200, description = "Player created", body = Player))
)]
pub async fn create_player(
    State(state): State<SharedState>,
    Json(payload): Json<CreatePlayerRequest>,
) -> Result<Json<Player>, AppError> {
    payload.validate()?;
    let player = PlayerRepository::new(&state.pool).create(&payload).await?;
    Ok(Json(player))
}

/// Apply a partial update to a player.
#[utoipa::path(
    put,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player identifier")),
    request_body = UpdatePlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = Player),
        (status = 404, description = "Player not found")
    )
)]
pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePlayerRequest>,
) -> Result<Json<Player>, AppError> {
    payload.validate()?;
    let player = PlayerRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {id} not found")))?;
    Ok(Json(player))
}

/// Delete a player; cascades to participations and team memberships.
#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player identifier")),
    responses(
        (status = 200, description = "Player deleted", body = MessageResponse),
        (status = 404, description = "Player not found")
    )
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = PlayerRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("player {id} not found")));
    }
    Ok(Json(MessageResponse::new("player deleted")))
}
