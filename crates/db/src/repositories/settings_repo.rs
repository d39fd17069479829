//! Repository for the `settings` key/value table.

use sqlx::PgPool;

use crate::models::setting::Setting;

/// Column list for `settings` queries.
const COLUMNS: &str = "key, value, updated_at";

/// Key/value settings operations.
pub struct SettingsRepo;

impl SettingsRepo {
    /// List all settings ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM settings ORDER BY key"))
            .fetch_all(pool)
            .await
    }

    /// Fetch one setting by key.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM settings WHERE key = $1"))
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a setting.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<Setting, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW() \
             RETURNING {COLUMNS}"
        ))
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await
    }

    /// Delete a setting. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
