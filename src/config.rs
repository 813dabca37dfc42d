//! Application configuration sourced from the process environment.

use std::env;

use tracing::{info, warn};

/// Default SQLite database location.
const DEFAULT_DATABASE_URL: &str = "sqlite://blind-test.db";
/// Default directory where uploaded player images are stored.
const DEFAULT_UPLOAD_DIR: &str = "public/images/usr";
/// Frontend origin the OAuth callback redirects back to.
const DEFAULT_FRONTEND_URL: &str = "http://127.0.0.1:3000";
/// Redirect URI registered with Spotify for the authorization callback.
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/api/spotify/auth/callback";
/// Spotify consent page.
const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
/// Spotify token endpoint used for code exchange and refresh.
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Spotify Web API base.
const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Spotify application client id.
    pub client_id: String,
    /// Spotify application client secret.
    pub client_secret: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// Directory uploaded images are written to.
    pub upload_dir: String,
    /// Frontend origin used for post-callback redirects.
    pub frontend_url: String,
    /// OAuth redirect URI handed to Spotify.
    pub redirect_uri: String,
    /// Consent page URL.
    pub authorize_url: String,
    /// Token endpoint URL.
    pub token_url: String,
    /// Web API base URL.
    pub api_base_url: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// The Spotify client credentials are required; everything else falls back
    /// to a local-development default with a log line noting the fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let client_id = required("SPOTIFY_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_CLIENT_SECRET")?;

        let config = Self {
            client_id,
            client_secret,
            database_url: optional("DATABASE_URL", DEFAULT_DATABASE_URL),
            upload_dir: optional("UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            frontend_url: optional("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            redirect_uri: optional("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            authorize_url: optional("SPOTIFY_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL),
            token_url: optional("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_base_url: optional("SPOTIFY_API_BASE_URL", DEFAULT_API_BASE_URL),
        };

        info!(database_url = %config.database_url, "configuration loaded");
        Ok(config)
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow::anyhow!("missing required environment variable {name}"))
}

fn optional(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            warn!(variable = name, default, "using default value");
            default.to_string()
        }
    }
}
