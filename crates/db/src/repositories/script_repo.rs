//! Repository for the `call_scripts` table.

use dialdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::script::{CallScript, CreateCallScript, UpdateCallScript};

/// Column list for `call_scripts` queries.
const COLUMNS: &str = "id, title, body, category, created_at, updated_at";

/// CRUD operations for call scripts.
pub struct ScriptRepo;

impl ScriptRepo {
    /// List all call scripts, optionally filtered by category.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<CallScript>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM call_scripts \
             WHERE ($1::text IS NULL OR category = $1) \
             ORDER BY title"
        ))
        .bind(category)
        .fetch_all(pool)
        .await
    }

    /// Create a call script.
    pub async fn create(pool: &PgPool, input: &CreateCallScript) -> Result<CallScript, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO call_scripts (title, body, category) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.category.as_deref())
        .fetch_one(pool)
        .await
    }

    /// Update a call script. Absent fields are left untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdateCallScript,
    ) -> Result<Option<CallScript>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE call_scripts SET \
                 title = COALESCE($2, title), \
                 body = COALESCE($3, body), \
                 category = COALESCE($4, category), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.body.as_deref())
        .bind(update.category.as_deref())
        .fetch_optional(pool)
        .await
    }

    /// Delete a call script. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM call_scripts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
