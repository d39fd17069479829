//! Repository for the `customers` table (existing-customer pool).

use dialdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{AddNote, CreateCustomer, Customer, UpdateCustomer};

/// Column list for `customers` queries.
const COLUMNS: &str = "id, name, phone, email, customer_type, flight_info, status, assigned_to, \
                       assigned_at, assigned_by, interaction_completed, notes, recycled_at, \
                       created_at";

/// CRUD and note-history operations for the customer pool.
pub struct CustomerRepo;

impl CustomerRepo {
    /// List customers in insertion order, optionally filtered.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        assigned_to: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM customers \
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

    /// Fetch one customer by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM customers WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk-import customer records. Returns the number inserted.
    pub async fn import(pool: &PgPool, records: &[CreateCustomer]) -> Result<u64, sqlx::Error> {
        let mut imported = 0u64;
        for record in records {
            sqlx::query(
                "INSERT INTO customers (name, phone, email, customer_type, flight_info) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(record.name.as_deref())
            .bind(&record.phone)
            .bind(record.email.as_deref())
            .bind(record.customer_type.as_deref())
            .bind(record.flight_info.as_ref())
            .execute(pool)
            .await?;
            imported += 1;
        }
        tracing::info!(imported, "Imported customer records");
        Ok(imported)
    }

    /// Update a customer's descriptive fields. Assignment fields are owned
    /// by the allocation and archive/recycle operations.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE customers SET \
                 name = COALESCE($2, name), \
                 phone = COALESCE($3, phone), \
                 email = COALESCE($4, email), \
                 customer_type = COALESCE($5, customer_type), \
                 flight_info = COALESCE($6, flight_info) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.email.as_deref())
        .bind(update.customer_type.as_deref())
        .bind(update.flight_info.as_ref())
        .fetch_optional(pool)
        .await
    }

    /// Append a note to a customer's history.
    pub async fn add_note(
        pool: &PgPool,
        id: DbId,
        note: &AddNote,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let entry = serde_json::json!([{
            "text": note.text,
            "author": note.author,
            "at": chrono::Utc::now(),
        }]);
        sqlx::query_as(&format!(
            "UPDATE customers SET notes = notes || $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(entry)
        .fetch_optional(pool)
        .await
    }

    /// Set the `interaction_completed` flag.
    ///
    /// This is independent of archival: it tracks customer-care follow-up,
    /// not the call lifecycle.
    pub async fn set_interaction_completed(
        pool: &PgPool,
        id: DbId,
        completed: bool,
    ) -> Result<Option<Customer>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE customers SET interaction_completed = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(completed)
        .fetch_optional(pool)
        .await
    }

    /// Delete one customer record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
