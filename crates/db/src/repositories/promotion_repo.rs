//! Repository for the `promotions` table.

use dialdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};

/// Column list for `promotions` queries.
const COLUMNS: &str = "id, title, description, active, starts_at, ends_at, created_at";

/// CRUD operations for promotions.
pub struct PromotionRepo;

impl PromotionRepo {
    /// List promotions, newest first. `active_only` hides inactive ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Promotion>, sqlx::Error> {
        let filter = if active_only { "WHERE active" } else { "" };
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM promotions {filter} ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Create a promotion.
    pub async fn create(pool: &PgPool, input: &CreatePromotion) -> Result<Promotion, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO promotions (title, description, active, starts_at, ends_at) \
             VALUES ($1, $2, COALESCE($3, TRUE), $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(&input.title)
        .bind(input.description.as_deref())
        .bind(input.active)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(pool)
        .await
    }

    /// Update a promotion. Absent fields are left untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdatePromotion,
    ) -> Result<Option<Promotion>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE promotions SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 active = COALESCE($4, active), \
                 starts_at = COALESCE($5, starts_at), \
                 ends_at = COALESCE($6, ends_at) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.active)
        .bind(update.starts_at)
        .bind(update.ends_at)
        .fetch_optional(pool)
        .await
    }

    /// Delete a promotion. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
