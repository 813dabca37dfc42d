use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dao::{
        models::{RoundTeam, RoundTeamPlayer},
        round_team::RoundTeamRepository,
        round_team_player::RoundTeamPlayerRepository,
    },
    dto::{
        common::{MessageResponse, Pagination},
        round_team::{CreateRoundTeamRequest, UpdateRoundTeamRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling per-round teams.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/round-teams",
            get(list_round_teams).post(create_round_team),
        )
        .route(
            "/api/round-teams/{id}",
            get(get_round_team)
                .put(update_round_team)
                .delete(delete_round_team),
        )
        .route("/api/round-teams/{id}/players", get(get_team_players))
}

/// List round teams with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/round-teams",
    tag = "round-teams",
    params(Pagination),
    responses((status = 200, description = "Round teams returned", body = [RoundTeam]))
)]
pub async fn list_round_teams(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<RoundTeam>>, AppError> {
    let teams = RoundTeamRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(teams))
}

/// Fetch a single round team.
#[utoipa::path(
    get,
    path = "/api/round-teams/{id}",
    tag = "round-teams",
    params(("id" = i64, Path, description = "Round team identifier")),
    responses(
        (status = 200, description = "Round team found", body = RoundTeam),
        (status = 404, description = "Round team not found")
    )
)]
pub async fn get_round_team(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<RoundTeam>, AppError> {
    let team = RoundTeamRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("round team {id} not found")))?;
    Ok(Json(team))
}

/// List the memberships of a team.
#[utoipa::path(
    get,
    path = "/api/round-teams/{id}/players",
    tag = "round-teams",
    params(("id" = i64, Path, description = "Round team identifier")),
    responses(
        (status = 200, description = "Memberships returned", body = [RoundTeamPlayer]),
        (status = 404, description = "Round team not found")
    )
)]
pub async fn get_team_players(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<RoundTeamPlayer>>, AppError> {
    if RoundTeamRepository::new(&state.pool)
        .find(id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("round team {id} not found")));
    }
    let players = RoundTeamPlayerRepository::new(&state.pool)
        .list_by_team(id)
        .await?;
    Ok(Json(players))
}

/// Create a team for a round.
#[utoipa::path(
    post,
    path = "/api/round-teams",
    tag = "round-teams",
    request_body = CreateRoundTeamRequest,
    responses((status = 200, description = "Round team created", body = RoundTeam))
)]
pub async fn create_round_team(
    State(state): State<SharedState>,
    Json(payload): Json<CreateRoundTeamRequest>,
) -> Result<Json<RoundTeam>, AppError> {
    let team = RoundTeamRepository::new(&state.pool)
        .create(&payload)
        .await?;
    Ok(Json(team))
}

/// Apply a partial update to a round team.
#[utoipa::path(
    put,
    path = "/api/round-teams/{id}",
    tag = "round-teams",
    params(("id" = i64, Path, description = "Round team identifier")),
    request_body = UpdateRoundTeamRequest,
    responses(
        (status = 200, description = "Round team updated", body = RoundTeam),
        (status = 404, description = "Round team not found")
    )
)]
pub async fn update_round_team(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoundTeamRequest>,
) -> Result<Json<RoundTeam>, AppError> {
    let team = RoundTeamRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("round team {id} not found")))?;
    Ok(Json(team))
}

/// Delete a round team; cascades to its memberships.
#[utoipa::path(
    delete,
    path = "/api/round-teams/{id}",
    tag = "round-teams",
    params(("id" = i64, Path, description = "Round team identifier")),
    responses(
        (status = 200, description = "Round team deleted", body = MessageResponse),
        (status = 404, description = "Round team not found")
    )
)]
pub async fn delete_round_team(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = RoundTeamRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("round team {id} not found")));
    }
    Ok(Json(MessageResponse::new("round team deleted")))
}
