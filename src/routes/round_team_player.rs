use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dao::{models::RoundTeamPlayer, round_team_player::RoundTeamPlayerRepository},
    dto::{
        common::{MessageResponse, Pagination},
        round_team_player::{CreateRoundTeamPlayerRequest, UpdateRoundTeamPlayerRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling team memberships and per-round roles.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/round-team-players",
            get(list_memberships).post(create_membership),
        )
        .route(
            "/api/round-team-players/{id}",
            get(get_membership)
                .put(update_membership)
                .delete(delete_membership),
        )
}

/// List memberships with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/round-team-players",
    tag = "round-team-players",
    params(Pagination),
    responses((status = 200, description = "Memberships returned", body = [RoundTeamPlayer]))
)]
pub async fn list_memberships(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<RoundTeamPlayer>>, AppError> {
    let memberships = RoundTeamPlayerRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(memberships))
}

/// Fetch a single membership.
#[utoipa::path(
    get,
    path = "/api/round-team-players/{id}",
    tag = "round-team-players",
    params(("id" = i64, Path, description = "Membership identifier")),
    responses(
        (status = 200, description = "Membership found", body = RoundTeamPlayer),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn get_membership(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<RoundTeamPlayer>, AppError> {
    let membership = RoundTeamPlayerRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("membership {id} not found")))?;
    Ok(Json(membership))
}

/// Assign a player to a team with a role.
#[utoipa::path(
    post,
    path = "/api/round-team-players",
    tag = "round-team-players",
    request_body = CreateRoundTeamPlayerRequest,
    responses((status = 200, description = "Membership created", body = RoundTeamPlayer))
)]
pub async fn create_membership(
    State(state): State<SharedState>,
    Json(payload): Json<CreateRoundTeamPlayerRequest>,
) -> Result<Json<RoundTeamPlayer>, AppError> {
    let membership = RoundTeamPlayerRepository::new(&state.pool)
        .create(&payload)
        .await?;
    Ok(Json(membership))
}

/// Apply a partial update to a membership, typically a role change.
#[utoipa::path(
    put,
    path = "/api/round-team-players/{id}",
    tag = "round-team-players",
    params(("id" = i64, Path, description = "Membership identifier")),
    request_body = UpdateRoundTeamPlayerRequest,
    responses(
        (status = 200, description = "Membership updated", body = RoundTeamPlayer),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn update_membership(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoundTeamPlayerRequest>,
) -> Result<Json<RoundTeamPlayer>, AppError> {
    let membership = RoundTeamPlayerRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("membership {id} not found")))?;
    Ok(Json(membership))
}

/// Remove a player from a team.
#[utoipa::path(
    delete,
    path = "/api/round-team-players/{id}",
    tag = "round-team-players",
    params(("id" = i64, Path, description = "Membership identifier")),
    responses(
        (status = 200, description = "Membership deleted", body = MessageResponse),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn delete_membership(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = RoundTeamPlayerRepository::new(&state.pool)
        .delete(id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound(format!("membership {id} not found")));
    }
    Ok(Json(MessageResponse::new("membership deleted")))
}
