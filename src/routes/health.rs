use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::health::HealthResponse, state::SharedState};

#[utoipa::path(
    get,
    path = "/healthcheck",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
/// Return the current health status of the backend and ping the database.
pub async fn healthcheck(State(state): State<SharedState>) -> Json<HealthResponse> {
    let status = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "healthy",
        Err(_) => "degraded",
    };
    Json(HealthResponse {
        status: status.to_string(),
    })
}

/// Greeting served at the root path.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = String))
)]
pub async fn welcome() -> &'static str {
    "Welcome to the Name That Tune API"
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/", get(welcome))
        .route("/healthcheck", get(healthcheck))
}
