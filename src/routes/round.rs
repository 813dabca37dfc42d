use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dao::{
        models::{Round, RoundSonglist},
        round::RoundRepository,
        round_songlist::RoundSonglistRepository,
    },
    dto::{
        common::{MessageResponse, Pagination},
        round::{CreateRoundRequest, RoundWithDetails, RoundWithTeams, UpdateRoundRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling rounds and their composed views.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/rounds", get(list_rounds).post(create_round))
        .route(
            "/api/rounds/{id}",
            get(get_round).put(update_round).delete(delete_round),
        )
        .route("/api/rounds/{id}/teams", get(get_round_teams))
        .route("/api/rounds/{id}/details", get(get_round_details))
        .route("/api/rounds/{id}/songlist", get(get_round_songlist))
}

/// List rounds with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/rounds",
    tag = "rounds",
    params(Pagination),
    responses((status = 200, description = "Rounds returned", body = [Round]))
)]
pub async fn list_rounds(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Round>>, AppError> {
    let rounds = RoundRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(rounds))
}

/// Fetch a single round.
#[utoipa::path(
    get,
    path = "/api/rounds/{id}",
    tag = "rounds",
    params(("id" = i64, Path, description = "Round identifier")),
    responses(
        (status = 200, description = "Round found", body = Round),
        (status = 404, description = "Round not found")
    )
)]
pub async fn get_round(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Round>, AppError> {
    let round = RoundRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("round {id} not found")))?;
    Ok(Json(round))
}

/// Fetch a round with its teams and their members.
#[utoipa::path(
    get,
    path = "/api/rounds/{id}/teams",
    tag = "rounds",
    params(("id" = i64, Path, description = "Round identifier")),
    responses(
        (status = 200, description = "Round with teams", body = RoundWithTeams),
        (status = 404, description = "Round not found")
    )
)]
pub async fn get_round_teams(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<RoundWithTeams>, AppError> {
    let round = RoundRepository::new(&state.pool)
        .find_with_teams(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("round {id} not found")))?;
    Ok(Json(round))
}

/// Fetch a round with its songlist entries joined to songs.
#[utoipa::path(
    get,
    path = "/api/rounds/{id}/details",
    tag = "rounds",
    params(("id" = i64, Path, description = "Round identifier")),
    responses(
        (status = 200, description = "Round with songlist details", body = RoundWithDetails),
        (status = 404, description = "Round not found")
    )
)]
pub async fn get_round_details(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<RoundWithDetails>, AppError> {
    let round = RoundRepository::new(&state.pool)
        .find_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("round {id} not found")))?;
    Ok(Json(round))
}

/// List the songlist entries attached to a round.
#[utoipa::path(
    get,
    path = "/api/rounds/{id}/songlist",
    tag = "rounds",
    params(("id" = i64, Path, description = "Round identifier")),
    responses(
        (status = 200, description = "Songlist entries returned", body = [RoundSonglist]),
        (status = 404, description = "Round not found")
    )
)]
pub async fn get_round_songlist(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<RoundSonglist>>, AppError> {
    if RoundRepository::new(&state.pool).find(id).await?.is_none() {
        return Err(AppError::NotFound(format!("round {id} not found")));
    }
    let entries = RoundSonglistRepository::new(&state.pool)
        .list_by_round(id)
        .await?;
    Ok(Json(entries))
}

/// Create a round.
#[utoipa::path(
    post,
    path = "/api/rounds",
    tag = "rounds",
    request_body = CreateRoundRequest,
    responses((status = 200, description = "Round created", body = Round))
)]
pub async fn create_round(
    State(state): State<SharedState>,
    Json(payload): Json<CreateRoundRequest>,
) -> Result<Json<Round>, AppError> {
    let round = RoundRepository::new(&state.pool).create(&payload).await?;
    Ok(Json(round))
}

/// Apply a partial update to a round, including its completion flag.
#[utoipa::path(
    put,
    path = "/api/rounds/{id}",
    tag = "rounds",
    params(("id" = i64, Path, description = "Round identifier")),
    request_body = UpdateRoundRequest,
    responses(
        (status = 200, description = "Round updated", body = Round),
        (status = 404, description = "Round not found")
    )
)]
pub async fn update_round(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoundRequest>,
) -> Result<Json<Round>, AppError> {
    let round = RoundRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("round {id} not found")))?;
    Ok(Json(round))
}

/// Delete a round; cascades to teams and songlist entries.
#[utoipa::path(
    delete,
    path = "/api/rounds/{id}",
    tag = "rounds",
    params(("id" = i64, Path, description = "Round identifier")),
    responses(
        (status = 200, description = "Round deleted", body = MessageResponse),
        (status = 404, description = "Round not found")
    )
)]
pub async fn delete_round(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = RoundRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("round {id} not found")));
    }
    Ok(Json(MessageResponse::new("round deleted")))
}
