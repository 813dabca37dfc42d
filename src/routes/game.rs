use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use crate::{
    dao::{
        game::GameRepository,
        models::{Game, Round},
        round::RoundRepository,
    },
    dto::{
        common::{MessageResponse, Pagination},
        game::{CreateGameRequest, GameFull, GameWithParticipants, UpdateGameRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling game lifecycle and composed game views.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/games", get(list_games).post(create_game))
        .route(
            "/api/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/api/games/{id}/participants", get(get_game_participants))
        .route("/api/games/{id}/full", get(get_game_full))
        .route("/api/games/{id}/rounds", get(get_game_rounds))
        .route("/api/games/{id}/active-round", get(get_active_round))
}

/// List games with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    params(Pagination),
    responses((status = 200, description = "Games returned", body = [Game]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Game>>, AppError> {
    let games = GameRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(games))
}

/// Fetch a single game.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game found", body = Game),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Game>, AppError> {
    let game = GameRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("game {id} not found")))?;
    Ok(Json(game))
}

/// Fetch a game together with its participants joined to players.
#[utoipa::path(
    get,
    path = "/api/games/{id}/participants",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game with participants", body = GameWithParticipants),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game_participants(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<GameWithParticipants>, AppError> {
    let game = GameRepository::new(&state.pool)
        .find_with_participants(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("game {id} not found")))?;
    Ok(Json(game))
}

/// Fetch a game with its participants and rounds in one payload.
#[utoipa::path(
    get,
    path = "/api/games/{id}/full",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Full game view", body = GameFull),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game_full(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<GameFull>, AppError> {
    let game = GameRepository::new(&state.pool)
        .find_full(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("game {id} not found")))?;
    Ok(Json(game))
}

/// List a game's rounds ordered by round number.
#[utoipa::path(
    get,
    path = "/api/games/{id}/rounds",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Rounds returned", body = [Round]),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game_rounds(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Round>>, AppError> {
    let repo = GameRepository::new(&state.pool);
    if repo.find(id).await?.is_none() {
        return Err(AppError::NotFound(format!("game {id} not found")));
    }
    let rounds = RoundRepository::new(&state.pool).list_by_game(id).await?;
    Ok(Json(rounds))
}

/// Fetch the first incomplete round of a game, by round number.
#[utoipa::path(
    get,
    path = "/api/games/{id}/active-round",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Active round", body = Round),
        (status = 404, description = "Game not found or no active round")
    )
)]
pub async fn get_active_round(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Round>, AppError> {
    let round = RoundRepository::new(&state.pool)
        .find_active_for_game(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("game {id} has no active round")))?;
    Ok(Json(round))
}

/// Create a game.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses((status = 200, description = "Game created", body = Game))
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<Game>, AppError> {
    let game = GameRepository::new(&state.pool).create(&payload).await?;
    Ok(Json(game))
}

/// Apply a partial update to a game.
#[utoipa::path(
    put,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = Game),
        (status = 404, description = "Game not found")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateGameRequest>,
) -> Result<Json<Game>, AppError> {
    let game = GameRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("game {id} not found")))?;
    Ok(Json(game))
}

/// Delete a game; cascades to participants, rounds, teams and songlists.
#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game deleted", body = MessageResponse),
        (status = 404, description = "Game not found")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = GameRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("game {id} not found")));
    }
    Ok(Json(MessageResponse::new("game deleted")))
}
