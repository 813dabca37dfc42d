//! Shared application state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    config::AppConfig, dao::credentials::CredentialStore, services::spotify_auth::SpotifyAuthService,
};

/// Everything handlers need, cloned cheaply behind an [`Arc`].
pub struct AppState {
    /// Connection pool for the relational store.
    pub pool: SqlitePool,
    /// Resolved runtime configuration.
    pub config: AppConfig,
    /// Shared HTTP client for outbound Spotify calls.
    pub http: reqwest::Client,
    /// Spotify OAuth token manager.
    pub spotify_auth: SpotifyAuthService,
}

/// Handle passed to every route.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Assemble the state from its already-initialized parts.
    pub fn new(pool: SqlitePool, config: AppConfig) -> SharedState {
        let http = reqwest::Client::new();
        let store = CredentialStore::new(pool.clone());
        let spotify_auth = SpotifyAuthService::new(&config, store, http.clone());
        Arc::new(Self {
            pool,
            config,
            http,
            spotify_auth,
        })
    }
}
