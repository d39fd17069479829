//! Repository for the `users` table.

use dialdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, password, role, permissions, daily_target, created_at";

/// CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// List all users ordered by username.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM users ORDER BY username"))
            .fetch_all(pool)
            .await
    }

    /// Fetch one user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Create a user.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO users (username, password, role, permissions, daily_target) \
             VALUES ($1, $2, COALESCE($3, 'agent'), COALESCE($4, '[]'::jsonb), COALESCE($5, 0)) \
             RETURNING {COLUMNS}"
        ))
        .bind(&input.username)
        .bind(&input.password)
        .bind(input.role.as_deref())
        .bind(input.permissions.as_ref())
        .bind(input.daily_target)
        .fetch_one(pool)
        .await
    }

    /// Update a user. Absent fields are left untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE users SET \
                 password = COALESCE($2, password), \
                 role = COALESCE($3, role), \
                 permissions = COALESCE($4, permissions), \
                 daily_target = COALESCE($5, daily_target) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(update.password.as_deref())
        .bind(update.role.as_deref())
        .bind(update.permissions.as_ref())
        .bind(update.daily_target)
        .fetch_optional(pool)
        .await
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
