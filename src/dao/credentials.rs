//! Credential storage for the Spotify OAuth tokens, layered over the
//! `gameplay_settings` table so token lifecycle code never touches the
//! generic settings feature directly.

use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

use crate::dao::{
    settings::SettingsRepository,
    storage::{StorageError, StorageResult},
};

/// Key prefix under which pending one-time authorization states are stored.
const STATE_KEY_PREFIX: &str = "OAUTH_STATE_";

/// Get/set/delete interface over the persisted credential rows.
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
}

impl CredentialStore {
    /// Create a store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read a named credential value.
    pub async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let setting = SettingsRepository::new(&self.pool).find_by_key(key).await?;
        Ok(setting.map(|setting| setting.value))
    }

    /// Create or overwrite a named credential value.
    pub async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        SettingsRepository::new(&self.pool).upsert(key, value).await?;
        Ok(())
    }

    /// Remove a named credential value if present.
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        SettingsRepository::new(&self.pool).delete(key).await?;
        Ok(())
    }

    /// Persist a freshly issued authorization state with an expiry deadline.
    ///
    /// States live in the store rather than process memory so they survive
    /// restarts and are shared between instances.
    pub async fn put_state(&self, state: &str, ttl: Duration) -> StorageResult<()> {
        let deadline = (OffsetDateTime::now_utc() + ttl)
            .format(&Rfc3339)
            .map_err(|err| StorageError::Corrupt(format!("formatting state deadline: {err}")))?;
        self.set(&format!("{STATE_KEY_PREFIX}{state}"), &deadline).await
    }

    /// Consume an authorization state.
    ///
    /// The row is deleted in the same statement that reads it, so a repeated
    /// callback with the same state finds nothing. Returns `true` only when
    /// the state existed and its deadline had not passed.
    pub async fn take_state(&self, state: &str) -> StorageResult<bool> {
        let deadline: Option<(String,)> =
            sqlx::query_as("DELETE FROM gameplay_settings WHERE key = ? RETURNING value")
                .bind(format!("{STATE_KEY_PREFIX}{state}"))
                .fetch_optional(&self.pool)
                .await?;

        let Some((deadline,)) = deadline else {
            return Ok(false);
        };
        let deadline = OffsetDateTime::parse(&deadline, &Rfc3339)
            .map_err(|err| StorageError::Corrupt(format!("parsing state deadline: {err}")))?;
        Ok(OffsetDateTime::now_utc() < deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::test_support::memory_pool;

    #[tokio::test]
    async fn state_is_single_use() {
        let pool = memory_pool().await;
        let store = CredentialStore::new(pool);

        store.put_state("abc123", Duration::minutes(10)).await.unwrap();
        assert!(store.take_state("abc123").await.unwrap());
        // Second consumption of the same state fails.
        assert!(!store.take_state("abc123").await.unwrap());
        // Unknown states fail outright.
        assert!(!store.take_state("never-issued").await.unwrap());
    }

    #[tokio::test]
    async fn expired_state_is_rejected() {
        let pool = memory_pool().await;
        let store = CredentialStore::new(pool);

        store.put_state("stale", Duration::minutes(-1)).await.unwrap();
        assert!(!store.take_state("stale").await.unwrap());
    }

    #[tokio::test]
    async fn get_set_delete_round_trip() {
        let pool = memory_pool().await;
        let store = CredentialStore::new(pool);

        assert!(store.get("SPOTIFY_ACCESS_TOKEN").await.unwrap().is_none());
        store.set("SPOTIFY_ACCESS_TOKEN", "tok").await.unwrap();
        assert_eq!(
            store.get("SPOTIFY_ACCESS_TOKEN").await.unwrap().as_deref(),
            Some("tok")
        );
        store.delete("SPOTIFY_ACCESS_TOKEN").await.unwrap();
        assert!(store.get("SPOTIFY_ACCESS_TOKEN").await.unwrap().is_none());
    }
}
