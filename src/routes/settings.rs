use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use validator::Validate;

use crate::{
    dao::{models::GameplaySetting, settings::SettingsRepository},
    dto::{
        common::{MessageResponse, Pagination},
        settings::{CreateSettingRequest, UpdateSettingRequest, UpsertSettingQuery},
    },
    error::AppError,
    state::SharedState,
};

/// Routes handling the gameplay settings key/value store.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/settings", get(list_settings).post(create_setting))
        .route(
            "/api/settings/{key}",
            get(get_setting).put(update_setting).delete(delete_setting),
        )
        .route("/api/settings/{key}/upsert", put(upsert_setting))
}

/// List settings with offset/limit pagination.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    params(Pagination),
    responses((status = 200, description = "Settings returned", body = [GameplaySetting]))
)]
pub async fn list_settings(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<GameplaySetting>>, AppError> {
    let settings = SettingsRepository::new(&state.pool)
        .list(page.skip, page.limit)
        .await?;
    Ok(Json(settings))
}

/// Fetch a setting by key.
#[utoipa::path(
    get,
    path = "/api/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting found", body = GameplaySetting),
        (status = 404, description = "Setting not found")
    )
)]
pub async fn get_setting(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<GameplaySetting>, AppError> {
    let setting = SettingsRepository::new(&state.pool)
        .find_by_key(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("setting {key} not found")))?;
    Ok(Json(setting))
}

/// Create a setting; the key must not already exist.
#[utoipa::path(
    post,
    path = "/api/settings",
    tag = "settings",
    request_body = CreateSettingRequest,
    responses(
        (status = 200, description = "Setting created", body = GameplaySetting),
        (status = 400, description = "Key already exists")
    )
)]
pub async fn create_setting(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSettingRequest>,
) -> Result<Json<GameplaySetting>, AppError> {
    payload.validate()?;
    let setting = SettingsRepository::new(&state.pool)
        .create(&payload.key, &payload.value)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("setting {} already exists", payload.key)))?;
    Ok(Json(setting))
}

/// Update an existing setting's value.
#[utoipa::path(
    put,
    path = "/api/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpdateSettingRequest,
    responses(
        (status = 200, description = "Setting updated", body = GameplaySetting),
        (status = 404, description = "Setting not found")
    )
)]
pub async fn update_setting(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    Json(payload): Json<UpdateSettingRequest>,
) -> Result<Json<GameplaySetting>, AppError> {
    payload.validate()?;
    let setting = SettingsRepository::new(&state.pool)
        .update(&key, &payload.value)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("setting {key} not found")))?;
    Ok(Json(setting))
}

/// Write a setting unconditionally, creating or overwriting the key.
#[utoipa::path(
    put,
    path = "/api/settings/{key}/upsert",
    tag = "settings",
    params(
        ("key" = String, Path, description = "Setting key"),
        UpsertSettingQuery
    ),
    responses((status = 200, description = "Setting stored", body = GameplaySetting))
)]
pub async fn upsert_setting(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    Query(query): Query<UpsertSettingQuery>,
) -> Result<Json<GameplaySetting>, AppError> {
    let setting = SettingsRepository::new(&state.pool)
        .upsert(&key, &query.value)
        .await?;
    Ok(Json(setting))
}

/// Delete a setting.
#[utoipa::path(
    delete,
    path = "/api/settings/{key}",
    tag = "settings",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting deleted", body = MessageResponse),
        (status = 404, description = "Setting not found")
    )
)]
pub async fn delete_setting(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = SettingsRepository::new(&state.pool).delete(&key).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("setting {key} not found")));
    }
    Ok(Json(MessageResponse::new("setting deleted")))
}
