use axum::{
    Json, Router,
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
};

use crate::{
    dto::{
        common::MessageResponse,
        spotify::{AccessTokenResponse, AuthStatusResponse, AuthUrlResponse, CallbackQuery},
    },
    error::{AppError, ServiceError},
    state::SharedState,
};

/// Routes handling the Spotify OAuth flow. These stay outside the
/// token-injecting middleware so an unauthenticated frontend can reach them.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/spotify/auth/login", get(login))
        .route("/api/spotify/auth/callback", get(callback))
        .route("/api/spotify/auth/token", get(token))
        .route("/api/spotify/auth/refresh", post(refresh))
        .route("/api/spotify/auth/logout", post(logout))
        .route("/api/spotify/auth/status", get(status))
}

/// Start the authorization flow by minting a one-time state and returning
/// the consent-page URL.
#[utoipa::path(
    get,
    path = "/api/spotify/auth/login",
    tag = "spotify-auth",
    responses((status = 200, description = "Consent URL issued", body = AuthUrlResponse))
)]
pub async fn login(State(state): State<SharedState>) -> Result<Json<AuthUrlResponse>, AppError> {
    let auth_url = state.spotify_auth.authorize_url().await?;
    Ok(Json(AuthUrlResponse { auth_url }))
}

/// Land the OAuth redirect, consume the one-time state and exchange the
/// code, then bounce the browser back to the frontend with the outcome in
/// the query string.
#[utoipa::path(
    get,
    path = "/api/spotify/auth/callback",
    tag = "spotify-auth",
    params(CallbackQuery),
    responses((status = 303, description = "Redirect back to the frontend"))
)]
pub async fn callback(
    State(state): State<SharedState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let frontend = &state.config.frontend_url;

    if let Some(error) = query.error {
        tracing::warn!(%error, "spotify consent denied");
        return Redirect::to(&format!("{frontend}?error={error}"));
    }

    let (Some(code), Some(received_state)) = (query.code, query.state) else {
        return Redirect::to(&format!("{frontend}?error=no_code"));
    };

    match state
        .spotify_auth
        .handle_callback(&code, &received_state)
        .await
    {
        Ok(()) => Redirect::to(&format!("{frontend}?auth=success")),
        Err(ServiceError::Unauthorized(_)) => {
            tracing::warn!("callback carried an unknown or expired state");
            Redirect::to(&format!("{frontend}?error=invalid_state"))
        }
        Err(err) => {
            tracing::error!(error = %err, "token exchange failed");
            Redirect::to(&format!("{frontend}?error=token_exchange_failed"))
        }
    }
}

/// Hand out a currently valid access token, refreshing it first if needed.
#[utoipa::path(
    get,
    path = "/api/spotify/auth/token",
    tag = "spotify-auth",
    responses(
        (status = 200, description = "Valid token returned", body = AccessTokenResponse),
        (status = 401, description = "Authorization required")
    )
)]
pub async fn token(State(state): State<SharedState>) -> Result<Json<AccessTokenResponse>, AppError> {
    let access_token = state.spotify_auth.access_token().await?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// Force a refresh regardless of the stored token's remaining lifetime.
#[utoipa::path(
    post,
    path = "/api/spotify/auth/refresh",
    tag = "spotify-auth",
    responses(
        (status = 200, description = "Token refreshed", body = AccessTokenResponse),
        (status = 401, description = "Re-authorization required")
    )
)]
pub async fn refresh(
    State(state): State<SharedState>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let access_token = state.spotify_auth.refresh().await?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// Drop all stored Spotify credentials.
#[utoipa::path(
    post,
    path = "/api/spotify/auth/logout",
    tag = "spotify-auth",
    responses((status = 200, description = "Credentials cleared", body = MessageResponse))
)]
pub async fn logout(State(state): State<SharedState>) -> Result<Json<MessageResponse>, AppError> {
    state.spotify_auth.logout().await?;
    Ok(Json(MessageResponse::new("logged out")))
}

/// Report whether usable Spotify credentials are stored.
#[utoipa::path(
    get,
    path = "/api/spotify/auth/status",
    tag = "spotify-auth",
    responses((status = 200, description = "Authorization status", body = AuthStatusResponse))
)]
pub async fn status(State(state): State<SharedState>) -> Result<Json<AuthStatusResponse>, AppError> {
    let status = state.spotify_auth.status().await?;
    Ok(Json(status))
}
