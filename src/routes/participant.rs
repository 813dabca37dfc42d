use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use crate::{
    dao::{models::Participant, participant::ParticipantRepository},
    dto::{
        common::{MessageResponse, Pagination},
        participant::{CreateParticipantRequest, ParticipantWithPlayer, UpdateParticipantRequest},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling game participation.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/participants",
            get(list_participants).post(create_participant),
        )
        .route(
            "/api/participants/{id}",
            get(get_participant)
                .put(update_participant)
                .delete(delete_participant),
        )
        .route(
            "/api/participants/{id}/with-player",
            get(get_participant_with_player),
        )
}

/// List participants with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/participants",
    tag = "participants",
    params(Pagination),
    responses((status = 200, description = "Participants returned", body = [Participant]))
)]
pub async fn list_participants(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Participant>>, AppError> {
    let participants = ParticipantRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(participants))
}

/// Fetch a single participant.
#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    tag = "participants",
    params(("id" = i64, Path, description = "Participant identifier")),
    responses(
        (status = 200, description = "Participant found", body = Participant),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn get_participant(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Participant>, AppError> {
    let participant = ParticipantRepository::new(&state.pool)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("participant {id} not found")))?;
    Ok(Json(participant))
}

/// Fetch a participant joined to its player profile.
#[utoipa::path(
    get,
    path = "/api/participants/{id}/with-player",
    tag = "participants",
    params(("id" = i64, Path, description = "Participant identifier")),
    responses(
        (status = 200, description = "Participant with player", body = ParticipantWithPlayer),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn get_participant_with_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ParticipantWithPlayer>, AppError> {
    let participant = ParticipantRepository::new(&state.pool)
        .find_with_player(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("participant {id} not found")))?;
    Ok(Json(participant))
}

/// Enroll a player into a game. Enrolling the same player twice returns
/// the original row unchanged.
#[utoipa::path(
    post,
    path = "/api/participants",
    tag = "participants",
    request_body = CreateParticipantRequest,
    responses((status = 200, description = "Participant created or already present", body = Participant))
)]
pub async fn create_participant(
    State(state): State<SharedState>,
    Json(payload): Json<CreateParticipantRequest>,
) -> Result<Json<Participant>, AppError> {
    let participant = ParticipantRepository::new(&state.pool)
        .create(&payload)
        .await?;
    Ok(Json(participant))
}

/// Apply a partial update to a participant.
#[utoipa::path(
    put,
    path = "/api/participants/{id}",
    tag = "participants",
    params(("id" = i64, Path, description = "Participant identifier")),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "Participant updated", body = Participant),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn update_participant(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateParticipantRequest>,
) -> Result<Json<Participant>, AppError> {
    let participant = ParticipantRepository::new(&state.pool)
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("participant {id} not found")))?;
    Ok(Json(participant))
}

/// Remove a player from a game.
#[utoipa::path(
    delete,
    path = "/api/participants/{id}",
    tag = "participants",
    params(("id" = i64, Path, description = "Participant identifier")),
    responses(
        (status = 200, description = "Participant deleted", body = MessageResponse),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn delete_participant(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = ParticipantRepository::new(&state.pool).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("participant {id} not found")));
    }
    Ok(Json(MessageResponse::new("participant deleted")))
}
