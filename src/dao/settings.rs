use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::dao::{models::GameplaySetting, storage::StorageResult};

/// Data access for the `gameplay_settings` key/value table.
pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a repository over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List settings with offset/limit pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> StorageResult<Vec<GameplaySetting>> {
        let settings = sqlx::query_as::<_, GameplaySetting>(
            "SELECT * FROM gameplay_settings ORDER BY setting_id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;
        Ok(settings)
    }

    /// Fetch one setting by key.
    pub async fn find_by_key(&self, key: &str) -> StorageResult<Option<GameplaySetting>> {
        let setting =
            sqlx::query_as::<_, GameplaySetting>("SELECT * FROM gameplay_settings WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;
        Ok(setting)
    }

    /// Insert a new setting; returns `None` when the key is already taken.
    pub async fn create(&self, key: &str, value: &str) -> StorageResult<Option<GameplaySetting>> {
        if self.find_by_key(key).await?.is_some() {
            return Ok(None);
        }
        Ok(Some(self.upsert(key, value).await?))
    }

    /// Update an existing setting; returns `None` when the key is absent.
    pub async fn update(&self, key: &str, value: &str) -> StorageResult<Option<GameplaySetting>> {
        if self.find_by_key(key).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.upsert(key, value).await?))
    }

    /// Create or overwrite a setting.
    pub async fn upsert(&self, key: &str, value: &str) -> StorageResult<GameplaySetting> {
        let now = OffsetDateTime::now_utc();
        let setting = sqlx::query_as::<_, GameplaySetting>(
            r#"
            INSERT INTO gameplay_settings (key, value, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE
                SET value = excluded.value, updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(setting)
    }

    /// Delete a setting by key. Returns whether a row was removed.
    pub async fn delete(&self, key: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM gameplay_settings WHERE key = ?")
            .bind(key)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::test_support::memory_pool;

    #[tokio::test]
    async fn create_rejects_duplicate_keys_but_upsert_overwrites() {
        let pool = memory_pool().await;
        let repo = SettingsRepository::new(&pool);

        let created = repo.create("ROUND_LENGTH", "5").await.unwrap();
        assert!(created.is_some());
        assert!(repo.create("ROUND_LENGTH", "9").await.unwrap().is_none());

        let upserted = repo.upsert("ROUND_LENGTH", "9").await.unwrap();
        assert_eq!(upserted.value, "9");
        assert_eq!(repo.list(0, 10).await.unwrap().len(), 1);

        assert!(repo.delete("ROUND_LENGTH").await.unwrap());
        assert!(!repo.delete("ROUND_LENGTH").await.unwrap());
    }
}
