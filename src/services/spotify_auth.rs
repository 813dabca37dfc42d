//! Spotify OAuth token lifecycle: authorization-code flow, persisted
//! credentials and automatic refresh around expiry.

use rand::Rng;
use reqwest::Url;
use serde::Deserialize;
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    dao::credentials::CredentialStore,
    dto::spotify::AuthStatusResponse,
    error::ServiceError,
};

/// Credential-store key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "SPOTIFY_ACCESS_TOKEN";
/// Credential-store key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "SPOTIFY_REFRESH_TOKEN";
/// Credential-store key holding the RFC3339 expiry instant.
pub const EXPIRES_AT_KEY: &str = "SPOTIFY_TOKEN_EXPIRES_AT";

/// Safety margin subtracted from the provider-reported token lifetime.
const EXPIRY_BUFFER: Duration = Duration::seconds(60);
/// How long an issued authorization state stays valid.
const STATE_TTL: Duration = Duration::minutes(10);
/// Token lifetime assumed when the provider omits `expires_in`.
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Scopes requested for playback control and playlist access.
const SCOPES: &[&str] = &[
    "streaming",
    "user-read-email",
    "user-read-private",
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-library-read",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-read-recently-played",
];

const AUTHORIZE_HINT: &str = "no Spotify authorization; please authorize in settings";
const REAUTHORIZE_HINT: &str = "please re-authorize in settings";

/// Token payload returned by the Spotify accounts service.
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Maintains one stored credential set for the whole process and refreshes
/// it on demand.
pub struct SpotifyAuthService {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    authorize_url: String,
    token_url: String,
    store: CredentialStore,
    http: reqwest::Client,
    // Serializes refresh so racing requests cannot interleave the three
    // credential writes; the loser reuses the winner's token.
    refresh_lock: Mutex<()>,
}

impl SpotifyAuthService {
    /// Build the service from the application configuration.
    pub fn new(config: &AppConfig, store: CredentialStore, http: reqwest::Client) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            authorize_url: config.authorize_url.clone(),
            token_url: config.token_url.clone(),
            store,
            http,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Issue a fresh one-time state and build the consent-page URL.
    pub async fn authorize_url(&self) -> Result<String, ServiceError> {
        let state = generate_state();
        self.store
            .put_state(&state, STATE_TTL)
            .await
            .map_err(ServiceError::from)?;

        let url = Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("state", state.as_str()),
                ("scope", SCOPES.join(" ").as_str()),
                ("show_dialog", "false"),
            ],
        )
        .map_err(|err| ServiceError::Internal(format!("building authorize URL: {err}")))?;
        Ok(url.into())
    }

    /// Handle the provider callback: consume the state, exchange the code
    /// and persist the resulting credential set.
    pub async fn handle_callback(&self, code: &str, state: &str) -> Result<(), ServiceError> {
        if !self.store.take_state(state).await? {
            warn!(state, "rejected callback with unknown or consumed state");
            return Err(ServiceError::Unauthorized(
                "unrecognized or expired authorization state".into(),
            ));
        }

        let tokens = self
            .request_tokens(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
            ])
            .await?;

        let _guard = self.refresh_lock.lock().await;
        self.persist_tokens(&tokens).await?;
        info!("stored Spotify credentials after authorization");
        Ok(())
    }

    /// Resolve a usable bearer token.
    ///
    /// Returns the cached token while it is still valid; otherwise performs
    /// exactly one refresh attempt. Without stored credentials the caller is
    /// told to start the authorization flow.
    pub async fn access_token(&self) -> Result<String, ServiceError> {
        if let Some(token) = self.valid_cached_token().await? {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        // A racing request may have refreshed while we waited for the lock.
        if let Some(token) = self.valid_cached_token().await? {
            return Ok(token);
        }
        self.refresh_locked().await
    }

    /// Force a refresh regardless of the stored expiry.
    pub async fn refresh(&self) -> Result<String, ServiceError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Drop every stored credential.
    pub async fn logout(&self) -> Result<(), ServiceError> {
        let _guard = self.refresh_lock.lock().await;
        self.store.delete(ACCESS_TOKEN_KEY).await?;
        self.store.delete(REFRESH_TOKEN_KEY).await?;
        self.store.delete(EXPIRES_AT_KEY).await?;
        info!("cleared Spotify credentials");
        Ok(())
    }

    /// Report whether a token is stored and whether it is still valid.
    pub async fn status(&self) -> Result<AuthStatusResponse, ServiceError> {
        let token = self.store.get(ACCESS_TOKEN_KEY).await?;
        let expires_at = self.store.get(EXPIRES_AT_KEY).await?;

        let (Some(_), Some(expires_at)) = (token, expires_at) else {
            return Ok(AuthStatusResponse {
                authenticated: false,
                has_token: false,
                expires_at: None,
            });
        };

        let authenticated = OffsetDateTime::parse(&expires_at, &Rfc3339)
            .map(|deadline| OffsetDateTime::now_utc() < deadline)
            .unwrap_or(false);
        Ok(AuthStatusResponse {
            authenticated,
            has_token: true,
            expires_at: Some(expires_at),
        })
    }

    /// Return the stored token if it has not expired yet; `None` means a
    /// refresh is needed. Missing credentials are an authorization error.
    async fn valid_cached_token(&self) -> Result<Option<String>, ServiceError> {
        let token = self.store.get(ACCESS_TOKEN_KEY).await?;
        let expires_at = self.store.get(EXPIRES_AT_KEY).await?;

        let (Some(token), Some(expires_at)) = (token, expires_at) else {
            return Err(ServiceError::Unauthorized(AUTHORIZE_HINT.into()));
        };
        let expires_at = OffsetDateTime::parse(&expires_at, &Rfc3339)
            .map_err(|err| ServiceError::Internal(format!("invalid stored expiry: {err}")))?;

        if OffsetDateTime::now_utc() < expires_at {
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    /// Exchange the stored refresh token; the caller must hold the refresh
    /// lock. Any failure surfaces as a re-authorization request.
    async fn refresh_locked(&self) -> Result<String, ServiceError> {
        let Some(refresh_token) = self.store.get(REFRESH_TOKEN_KEY).await? else {
            return Err(ServiceError::Unauthorized(format!(
                "token expired and no refresh token is stored; {REAUTHORIZE_HINT}"
            )));
        };

        let tokens = self
            .request_tokens(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &refresh_token),
            ])
            .await
            .map_err(|err| {
                warn!(error = %err, "token refresh failed");
                ServiceError::Unauthorized(format!("token refresh failed; {REAUTHORIZE_HINT}"))
            })?;

        self.persist_tokens(&tokens).await?;
        info!("refreshed Spotify access token");
        Ok(tokens.access_token)
    }

    /// POST to the token endpoint with client credentials in the basic-auth
    /// header.
    async fn request_tokens(
        &self,
        form: &[(&str, &str)],
    ) -> Result<TokenExchangeResponse, ServiceError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|err| ServiceError::Upstream(format!("token endpoint unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<TokenExchangeResponse>()
            .await
            .map_err(|err| ServiceError::Upstream(format!("invalid token response: {err}")))
    }

    /// Persist a credential set with a freshly computed expiry.
    async fn persist_tokens(&self, tokens: &TokenExchangeResponse) -> Result<(), ServiceError> {
        let lifetime = tokens.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
        let expires_at = OffsetDateTime::now_utc()
            + Duration::seconds((lifetime - EXPIRY_BUFFER.whole_seconds()).max(0));
        let expires_at = expires_at
            .format(&Rfc3339)
            .map_err(|err| ServiceError::Internal(format!("formatting expiry: {err}")))?;

        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token).await?;
        self.store.set(EXPIRES_AT_KEY, &expires_at).await?;
        if let Some(refresh_token) = &tokens.refresh_token {
            self.store.set(REFRESH_TOKEN_KEY, refresh_token).await?;
        }
        Ok(())
    }
}

/// Unguessable one-time state: a v4 uuid with a random hex suffix.
fn generate_state() -> String {
    let mut rng = rand::rng();
    format!("{}-{:016x}", uuid::Uuid::new_v4(), rng.random::<u64>())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Json, Router, extract::State, routing::post};
    use serde_json::json;

    use super::*;
    use crate::dao::test_support::memory_pool;

    fn test_config(token_url: String) -> AppConfig {
        AppConfig {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            database_url: "sqlite::memory:".into(),
            upload_dir: "/tmp".into(),
            frontend_url: "http://127.0.0.1:3000".into(),
            redirect_uri: "http://127.0.0.1:8080/api/spotify/auth/callback".into(),
            authorize_url: "https://accounts.spotify.com/authorize".into(),
            token_url,
            api_base_url: "https://api.spotify.com/v1".into(),
        }
    }

    /// Local stand-in for the Spotify token endpoint counting every call.
    async fn spawn_token_endpoint(calls: Arc<AtomicUsize>) -> String {
        async fn issue(State(calls): State<Arc<AtomicUsize>>) -> Json<serde_json::Value> {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Json(json!({
                "access_token": format!("token-{n}"),
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": format!("refresh-{n}"),
            }))
        }

        let app = Router::new().route("/api/token", post(issue)).with_state(calls);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/token")
    }

    async fn service_with_endpoint(calls: Arc<AtomicUsize>) -> SpotifyAuthService {
        let token_url = spawn_token_endpoint(calls).await;
        let pool = memory_pool().await;
        SpotifyAuthService::new(
            &test_config(token_url),
            CredentialStore::new(pool),
            reqwest::Client::new(),
        )
    }

    fn rfc3339_in(seconds: i64) -> String {
        (OffsetDateTime::now_utc() + Duration::seconds(seconds))
            .format(&Rfc3339)
            .unwrap()
    }

    #[tokio::test]
    async fn valid_token_is_returned_without_network_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        service.store.set(ACCESS_TOKEN_KEY, "cached").await.unwrap();
        service
            .store
            .set(EXPIRES_AT_KEY, &rfc3339_in(600))
            .await
            .unwrap();

        let token = service.access_token().await.unwrap();
        assert_eq!(token, "cached");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn expired_token_triggers_exactly_one_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        service.store.set(ACCESS_TOKEN_KEY, "stale").await.unwrap();
        service.store.set(REFRESH_TOKEN_KEY, "refresh-0").await.unwrap();
        service
            .store
            .set(EXPIRES_AT_KEY, &rfc3339_in(-10))
            .await
            .unwrap();

        let token = service.access_token().await.unwrap();
        assert_eq!(token, "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The refreshed credentials are now cached; no further calls.
        let token = service.access_token().await.unwrap();
        assert_eq!(token, "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = Arc::new(service_with_endpoint(calls.clone()).await);

        service.store.set(ACCESS_TOKEN_KEY, "stale").await.unwrap();
        service.store.set(REFRESH_TOKEN_KEY, "refresh-0").await.unwrap();
        service
            .store
            .set(EXPIRES_AT_KEY, &rfc3339_in(-10))
            .await
            .unwrap();

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.access_token().await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.access_token().await })
        };

        let token_a = a.await.unwrap().unwrap();
        let token_b = b.await.unwrap().unwrap();
        assert_eq!(token_a, token_b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_credentials_demand_authorization() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        let err = service.access_token().await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn expired_without_refresh_token_demands_reauthorization() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        service.store.set(ACCESS_TOKEN_KEY, "stale").await.unwrap();
        service
            .store
            .set(EXPIRES_AT_KEY, &rfc3339_in(-10))
            .await
            .unwrap();

        let err = service.access_token().await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn callback_with_unknown_state_skips_the_exchange() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        let err = service
            .handle_callback("some-code", "never-issued")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn callback_state_is_single_use() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        let url = service.authorize_url().await.unwrap();
        let url = Url::parse(&url).unwrap();
        let state = url
            .query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .unwrap();

        service.handle_callback("code", &state).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Replaying the callback is rejected before any exchange.
        let err = service.handle_callback("code", &state).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The exchange left a usable credential set behind.
        let token = service.access_token().await.unwrap();
        assert_eq!(token, "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn logout_clears_credentials() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service_with_endpoint(calls.clone()).await;

        service.store.set(ACCESS_TOKEN_KEY, "tok").await.unwrap();
        service.store.set(REFRESH_TOKEN_KEY, "ref").await.unwrap();
        service
            .store
            .set(EXPIRES_AT_KEY, &rfc3339_in(600))
            .await
            .unwrap();

        let status = service.status().await.unwrap();
        assert!(status.authenticated);

        service.logout().await.unwrap();
        let status = service.status().await.unwrap();
        assert!(!status.has_token);
        assert!(matches!(
            service.access_token().await.unwrap_err(),
            ServiceError::Unauthorized(_)
        ));
    }
}
