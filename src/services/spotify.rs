//! Thin client for the Spotify Web API.
//!
//! One method per remote endpoint; every call carries the injected bearer
//! token and any non-success status is surfaced as a uniform upstream error.
//! No retries, no caching.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{
    dto::spotify::{
        PlaybackRequest, RawAlbum, RawArtist, RawPlaylist, RawTrack, RawUser, SpotifyAlbum,
        SpotifyArtist, SpotifyPlaylist, SpotifyTrack, SpotifyUser,
    },
    error::ServiceError,
};

#[derive(serde::Deserialize)]
struct TracksEnvelope {
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

#[derive(serde::Deserialize)]
struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(serde::Deserialize)]
struct SearchEnvelope {
    tracks: ItemsEnvelope<RawTrack>,
}

#[derive(serde::Deserialize)]
struct PlayedItem {
    track: RawTrack,
}

#[derive(serde::Deserialize)]
struct CurrentlyPlayingEnvelope {
    #[serde(default)]
    item: Option<RawTrack>,
}

/// Request-scoped Spotify Web API client bound to one bearer token.
pub struct SpotifyClient<'a> {
    http: &'a reqwest::Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> SpotifyClient<'a> {
    /// Bind a client to the shared HTTP pool and the resolved token.
    pub fn new(http: &'a reqwest::Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// The authorized user's profile.
    pub async fn current_user(&self) -> Result<SpotifyUser, ServiceError> {
        let raw: RawUser = self.get("me", &[]).await?;
        Ok(raw.into())
    }

    /// Another user's public profile.
    pub async fn user_profile(&self, user_id: &str) -> Result<SpotifyUser, ServiceError> {
        let raw: RawUser = self.get(&format!("users/{user_id}"), &[]).await?;
        Ok(raw.into())
    }

    /// A single track.
    pub async fn track(&self, track_id: &str) -> Result<SpotifyTrack, ServiceError> {
        let raw: RawTrack = self.get(&format!("tracks/{track_id}"), &[]).await?;
        Ok(raw.into())
    }

    /// Several tracks in one call.
    pub async fn tracks(&self, track_ids: &[&str]) -> Result<Vec<SpotifyTrack>, ServiceError> {
        let envelope: TracksEnvelope = self
            .get("tracks", &[("ids", track_ids.join(","))])
            .await?;
        Ok(envelope.tracks.into_iter().map(Into::into).collect())
    }

    /// Track search.
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SpotifyTrack>, ServiceError> {
        let envelope: SearchEnvelope = self
            .get(
                "search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(envelope.tracks.items.into_iter().map(Into::into).collect())
    }

    /// A single artist.
    pub async fn artist(&self, artist_id: &str) -> Result<SpotifyArtist, ServiceError> {
        let raw: RawArtist = self.get(&format!("artists/{artist_id}"), &[]).await?;
        Ok(raw.into())
    }

    /// An artist's albums.
    pub async fn artist_albums(
        &self,
        artist_id: &str,
        limit: i64,
    ) -> Result<Vec<SpotifyAlbum>, ServiceError> {
        let envelope: ItemsEnvelope<RawAlbum> = self
            .get(
                &format!("artists/{artist_id}/albums"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.items.into_iter().map(Into::into).collect())
    }

    /// An artist's top tracks for a market.
    pub async fn artist_top_tracks(
        &self,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<SpotifyTrack>, ServiceError> {
        let envelope: TracksEnvelope = self
            .get(
                &format!("artists/{artist_id}/top-tracks"),
                &[("market", market.to_string())],
            )
            .await?;
        Ok(envelope.tracks.into_iter().map(Into::into).collect())
    }

    /// A single album.
    pub async fn album(&self, album_id: &str) -> Result<SpotifyAlbum, ServiceError> {
        let raw: RawAlbum = self.get(&format!("albums/{album_id}"), &[]).await?;
        Ok(raw.into())
    }

    /// An album's tracks.
    pub async fn album_tracks(
        &self,
        album_id: &str,
        limit: i64,
    ) -> Result<Vec<SpotifyTrack>, ServiceError> {
        let envelope: ItemsEnvelope<RawTrack> = self
            .get(
                &format!("albums/{album_id}/tracks"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.items.into_iter().map(Into::into).collect())
    }

    /// A single playlist.
    pub async fn playlist(&self, playlist_id: &str) -> Result<SpotifyPlaylist, ServiceError> {
        let raw: RawPlaylist = self.get(&format!("playlists/{playlist_id}"), &[]).await?;
        Ok(raw.into())
    }

    /// A page of playlist tracks, passed through verbatim.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Value, ServiceError> {
        self.get(
            &format!("playlists/{playlist_id}/tracks"),
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// The authorized user's playlists.
    pub async fn user_playlists(&self, limit: i64) -> Result<Vec<SpotifyPlaylist>, ServiceError> {
        let envelope: ItemsEnvelope<RawPlaylist> = self
            .get("me/playlists", &[("limit", limit.to_string())])
            .await?;
        Ok(envelope.items.into_iter().map(Into::into).collect())
    }

    /// Create a playlist on a user's account.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<SpotifyPlaylist, ServiceError> {
        let body = json!({ "name": name, "public": public, "description": description });
        let raw: RawPlaylist = self
            .post_json(&format!("users/{user_id}/playlists"), &body)
            .await?;
        Ok(raw.into())
    }

    /// Append track URIs to a playlist.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<(), ServiceError> {
        let body = json!({ "uris": track_uris });
        self.post_json::<Value>(&format!("playlists/{playlist_id}/tracks"), &body)
            .await?;
        Ok(())
    }

    /// Full playback state, passed through verbatim.
    pub async fn playback_state(&self) -> Result<Value, ServiceError> {
        self.get("me/player", &[]).await
    }

    /// The currently playing track, if any.
    pub async fn currently_playing(&self) -> Result<Option<SpotifyTrack>, ServiceError> {
        let envelope: CurrentlyPlayingEnvelope = self.get("me/player/currently-playing", &[]).await?;
        Ok(envelope.item.map(Into::into))
    }

    /// Recently played tracks.
    pub async fn recently_played(&self, limit: i64) -> Result<Vec<SpotifyTrack>, ServiceError> {
        let envelope: ItemsEnvelope<PlayedItem> = self
            .get("me/player/recently-played", &[("limit", limit.to_string())])
            .await?;
        Ok(envelope
            .items
            .into_iter()
            .map(|item| item.track.into())
            .collect())
    }

    /// Available playback devices, passed through verbatim.
    pub async fn devices(&self) -> Result<Value, ServiceError> {
        self.get("me/player/devices", &[]).await
    }

    /// Start or resume playback.
    pub async fn start_playback(&self, request: &PlaybackRequest) -> Result<(), ServiceError> {
        let mut body = serde_json::Map::new();
        if let Some(context_uri) = &request.context_uri {
            body.insert("context_uri".into(), json!(context_uri));
        }
        if let Some(uris) = &request.uris {
            body.insert("uris".into(), json!(uris));
        }
        if let Some(position_ms) = request.position_ms {
            body.insert("position_ms".into(), json!(position_ms));
        }
        if let Some(offset) = &request.offset {
            body.insert("offset".into(), offset.clone());
        }
        self.put("me/player/play", Some(&Value::Object(body))).await
    }

    /// Pause playback on the active device.
    pub async fn pause_playback(&self) -> Result<(), ServiceError> {
        self.put("me/player/pause", None).await
    }

    /// Skip to the next track.
    pub async fn skip_to_next(&self) -> Result<(), ServiceError> {
        self.post_empty("me/player/next").await
    }

    /// Skip to the previous track.
    pub async fn skip_to_previous(&self) -> Result<(), ServiceError> {
        self.post_empty("me/player/previous").await
    }

    /// Toggle shuffle on the active device.
    pub async fn set_shuffle(&self, state: bool) -> Result<(), ServiceError> {
        self.put(&format!("me/player/shuffle?state={state}"), None)
            .await
    }

    /// Transfer playback to another device.
    pub async fn transfer_playback(
        &self,
        device_ids: &[String],
        play: Option<bool>,
    ) -> Result<(), ServiceError> {
        let mut body = json!({ "device_ids": device_ids });
        if let Some(play) = play {
            body["play"] = json!(play);
        }
        self.put("me/player", Some(&body)).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .bearer_auth(self.token)
            .query(query)
            .send()
            .await
            .map_err(unreachable_upstream)?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ServiceError> {
        let response = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(self.token)
            .json(body)
            .send()
            .await
            .map_err(unreachable_upstream)?;
        Self::decode(response).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), ServiceError> {
        let response = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(self.token)
            .send()
            .await
            .map_err(unreachable_upstream)?;
        Self::ensure_success(response).await
    }

    async fn put(&self, path: &str, body: Option<&Value>) -> Result<(), ServiceError> {
        let mut request = self
            .http
            .put(format!("{}/{path}", self.base_url))
            .bearer_auth(self.token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(unreachable_upstream)?;
        Self::ensure_success(response).await
    }

    /// Decode a JSON body; playback endpoints answer 204 with an empty body,
    /// which decodes as JSON null.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ServiceError::Upstream(format!("reading Spotify response: {err}")))?;
        if !status.is_success() {
            return Err(ServiceError::Upstream(format!(
                "Spotify returned {status}: {body}"
            )));
        }
        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body)
            .map_err(|err| ServiceError::Upstream(format!("invalid Spotify response: {err}")))
    }

    async fn ensure_success(response: reqwest::Response) -> Result<(), ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Upstream(format!(
            "Spotify returned {status}: {body}"
        )))
    }
}

fn unreachable_upstream(err: reqwest::Error) -> ServiceError {
    ServiceError::Upstream(format!("Spotify unreachable: {err}"))
}
