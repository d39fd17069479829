//! Repository for the `clients` table (prospective-client number pool).

use dialdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient, UpdateClient};

/// Column list for `clients` queries.
const COLUMNS: &str = "id, phone_number, name, customer_type, airplane, status, assigned_to, \
                       assigned_at, recycled_at, created_at";

/// CRUD operations for the number pool.
pub struct ClientRepo;

impl ClientRepo {
    /// List clients in insertion order, optionally filtered.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        assigned_to: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM clients \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::text IS NULL OR assigned_to = $2) \
             ORDER BY id \
             LIMIT $3 OFFSET $4"
        ))
        .bind(status)
        .bind(assigned_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Fetch one client by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM clients WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk-import number records. Returns the number inserted.
    pub async fn import(pool: &PgPool, records: &[CreateClient]) -> Result<u64, sqlx::Error> {
        let mut imported = 0u64;
        for record in records {
            sqlx::query(
                "INSERT INTO clients (phone_number, name, customer_type, airplane) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&record.phone_number)
            .bind(record.name.as_deref())
            .bind(record.customer_type.as_deref())
            .bind(record.airplane.as_deref())
            .execute(pool)
            .await?;
            imported += 1;
        }
        tracing::info!(imported, "Imported client records");
        Ok(imported)
    }

    /// Update a client's descriptive fields. Assignment fields are owned by
    /// the allocation and archive/recycle operations and are not touched
    /// here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE clients SET \
                 phone_number = COALESCE($2, phone_number), \
                 name = COALESCE($3, name), \
                 customer_type = COALESCE($4, customer_type), \
                 airplane = COALESCE($5, airplane) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(update.phone_number.as_deref())
        .bind(update.name.as_deref())
        .bind(update.customer_type.as_deref())
        .bind(update.airplane.as_deref())
        .fetch_optional(pool)
        .await
    }

    /// Delete one client record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Admin wipe: delete the whole pool. The only hard-delete path besides
    /// the per-record delete and the lifecycle moves.
    pub async fn wipe(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients").execute(pool).await?;
        tracing::warn!(deleted = result.rows_affected(), "Wiped client pool");
        Ok(result.rows_affected())
    }
}
