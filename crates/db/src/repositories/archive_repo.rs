//! Repository for the `archive` table (terminal call history).

use dialdesk_core::types::{DbId, PoolKind};
use sqlx::PgPool;

use crate::models::archive::ArchiveRecord;

/// Column list for `archive` queries.
const COLUMNS: &str = "id, entity_type, source_id, phone_number, agent_id, payload, outcome, \
                       called_at, archived_at";

/// Read/restore/delete operations for archived call history.
pub struct ArchiveRepo;

impl ArchiveRepo {
    /// List archive records, newest first, optionally filtered by entity
    /// type.
    pub async fn list(
        pool: &PgPool,
        entity_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArchiveRecord>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM archive \
             WHERE ($1::text IS NULL OR entity_type = $1) \
             ORDER BY archived_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(entity_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Fetch one archive record by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArchiveRecord>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM archive WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one archive record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM archive WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore an archive record into its origin pool.
    ///
    /// Not an undo: a fresh pool record is minted with `status = 'available'`
    /// and cleared assignment fields, reconstructed from the archived
    /// payload, and the archive row is deleted. Call and claim history other
    /// than what the payload carries is discarded.
    ///
    /// Returns the pool the record went back to, or `None` when no archive
    /// row exists under `id`.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<PoolKind>, sqlx::Error> {
        let Some(record) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let kind = restore_target(&record);
        let payload = &record.payload;

        match kind {
            PoolKind::Client => {
                let phone = payload_str(payload, "phoneNumber")
                    .or_else(|| record.phone_number.clone())
                    .unwrap_or_default();
                sqlx::query(
                    "INSERT INTO clients \
                     (phone_number, name, customer_type, airplane, status) \
                     VALUES ($1, $2, $3, $4, 'available')",
                )
                .bind(phone)
                .bind(payload_str(payload, "name"))
                .bind(payload_str(payload, "customerType"))
                .bind(payload_str(payload, "airplane"))
                .execute(pool)
                .await?;
            }
            PoolKind::Customer => {
                let phone = payload_str(payload, "phone")
                    .or_else(|| record.phone_number.clone())
                    .unwrap_or_default();
                sqlx::query(
                    "INSERT INTO customers \
                     (name, phone, email, customer_type, flight_info, status) \
                     VALUES ($1, $2, $3, $4, $5, 'available')",
                )
                .bind(payload_str(payload, "name"))
                .bind(phone)
                .bind(payload_str(payload, "email"))
                .bind(payload_str(payload, "customerType"))
                .bind(payload.get("flightInfo"))
                .execute(pool)
                .await?;
            }
        }

        Self::delete(pool, id).await?;
        tracing::info!(archive_id = id, pool = %kind, "Restored archive record");
        Ok(Some(kind))
    }
}

/// Decide which pool a restore goes to.
///
/// `entity_type` is normally 'client' or 'customer'. Rows tagged
/// 'assignment' carry a pool snapshot as payload; the payload's `kind` field
/// or its phone key shape decides, defaulting to the client pool.
fn restore_target(record: &ArchiveRecord) -> PoolKind {
    if let Some(kind) = PoolKind::parse(&record.entity_type) {
        return kind;
    }
    if let Some(kind) = record
        .payload
        .get("kind")
        .and_then(|v| v.as_str())
        .and_then(PoolKind::parse)
    {
        return kind;
    }
    if record.payload.get("phone").is_some() {
        PoolKind::Customer
    } else {
        PoolKind::Client
    }
}

fn payload_str(payload: &serde_json::Value, key: &str) -> Option<String> {
    payload.get(key).and_then(|v| v.as_str()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(entity_type: &str, payload: serde_json::Value) -> ArchiveRecord {
        ArchiveRecord {
            id: 1,
            entity_type: entity_type.to_string(),
            source_id: None,
            phone_number: None,
            agent_id: None,
            payload,
            outcome: None,
            called_at: None,
            archived_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn restore_target_honors_entity_type() {
        assert_eq!(
            restore_target(&record("client", json!({}))),
            PoolKind::Client
        );
        assert_eq!(
            restore_target(&record("customer", json!({}))),
            PoolKind::Customer
        );
    }

    #[test]
    fn restore_target_falls_back_to_payload_shape() {
        // 'assignment' rows: payload kind wins, then the phone key shape.
        assert_eq!(
            restore_target(&record("assignment", json!({"kind": "customer"}))),
            PoolKind::Customer
        );
        assert_eq!(
            restore_target(&record("assignment", json!({"phone": "+234"}))),
            PoolKind::Customer
        );
        assert_eq!(
            restore_target(&record("assignment", json!({"phoneNumber": "+234"}))),
            PoolKind::Client
        );
    }
}
