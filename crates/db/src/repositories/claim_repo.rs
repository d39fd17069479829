//! Repository for the `number_claims` table (phone lease).
//!
//! A claim is a lease, not a mutex: there is no disconnect-driven release, so
//! a claim always resolves by explicit release or by the 5-minute TTL. Every
//! read path sweeps expired rows before looking at anything.
//!
//! The acquire path is check-then-upsert. Two near-simultaneous claims on the
//! same number can both pass the check before either upsert lands; that
//! TOCTOU window is an inherited property of the design, not a guarantee.

use chrono::{Duration, Utc};
use dialdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::claim::{ClaimOutcome, NumberClaim};

/// Lease duration for a phone-number claim, in minutes.
pub const CLAIM_TTL_MINS: i64 = 5;

/// Column list for `number_claims` queries.
const COLUMNS: &str =
    "phone_number, user_id, user_name, contact_id, contact_type, claimed_at, expires_at";

/// Lease acquire/extend/release/list operations for phone-number claims.
pub struct ClaimRepo;

impl ClaimRepo {
    /// Delete all claim rows whose lease has expired.
    ///
    /// Returns the number of rows swept.
    pub async fn sweep_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM number_claims WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        let swept = result.rows_affected();
        if swept > 0 {
            tracing::debug!(swept, "Swept expired number claims");
        }
        Ok(swept)
    }

    /// Attempt to claim a phone number for `user_id`.
    ///
    /// An unexpired claim by a different user blocks the attempt and reports
    /// the holder's display name. A claim by the same user is refreshed:
    /// re-claiming resets the TTL.
    pub async fn claim(
        pool: &PgPool,
        phone_number: &str,
        user_id: &str,
        user_name: &str,
        contact_id: Option<DbId>,
        contact_type: Option<&str>,
    ) -> Result<ClaimOutcome, sqlx::Error> {
        Self::sweep_expired(pool).await?;

        let existing: Option<NumberClaim> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM number_claims \
             WHERE phone_number = $1 AND expires_at > NOW()"
        ))
        .bind(phone_number)
        .fetch_optional(pool)
        .await?;

        if let Some(claim) = existing {
            if claim.user_id != user_id {
                return Ok(ClaimOutcome::Held {
                    holder: claim.user_name,
                });
            }
        }

        let expires_at = Utc::now() + Duration::minutes(CLAIM_TTL_MINS);
        sqlx::query(
            "INSERT INTO number_claims \
             (phone_number, user_id, user_name, contact_id, contact_type, claimed_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), $6) \
             ON CONFLICT (phone_number) DO UPDATE SET \
                 user_id = EXCLUDED.user_id, \
                 user_name = EXCLUDED.user_name, \
                 contact_id = EXCLUDED.contact_id, \
                 contact_type = EXCLUDED.contact_type, \
                 claimed_at = EXCLUDED.claimed_at, \
                 expires_at = EXCLUDED.expires_at",
        )
        .bind(phone_number)
        .bind(user_id)
        .bind(user_name)
        .bind(contact_id)
        .bind(contact_type)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(ClaimOutcome::Acquired)
    }

    /// Reset the TTL on an existing claim.
    ///
    /// Returns `true` only when an unexpired claim owned by `user_id` was
    /// extended; `false` when there is no matching claim.
    pub async fn extend(
        pool: &PgPool,
        phone_number: &str,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        Self::sweep_expired(pool).await?;

        let expires_at = Utc::now() + Duration::minutes(CLAIM_TTL_MINS);
        let result = sqlx::query(
            "UPDATE number_claims SET expires_at = $3 \
             WHERE phone_number = $1 AND user_id = $2",
        )
        .bind(phone_number)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Release a claim iff it belongs to `user_id`.
    ///
    /// Releasing someone else's claim (or a non-existent one) is a silent
    /// no-op: a caller can never force-release another agent's hold.
    pub async fn release(
        pool: &PgPool,
        phone_number: &str,
        user_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM number_claims WHERE phone_number = $1 AND user_id = $2")
            .bind(phone_number)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Sweep expired rows, then return all remaining claims.
    pub async fn list(pool: &PgPool) -> Result<Vec<NumberClaim>, sqlx::Error> {
        Self::sweep_expired(pool).await?;
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM number_claims ORDER BY phone_number"
        ))
        .fetch_all(pool)
        .await
    }

    /// Insert a claim row with an arbitrary expiry. Test setup only.
    #[doc(hidden)]
    pub async fn insert_raw(
        pool: &PgPool,
        phone_number: &str,
        user_id: &str,
        user_name: &str,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO number_claims (phone_number, user_id, user_name, expires_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (phone_number) DO UPDATE SET \
                 user_id = EXCLUDED.user_id, \
                 user_name = EXCLUDED.user_name, \
                 expires_at = EXCLUDED.expires_at",
        )
        .bind(phone_number)
        .bind(user_id)
        .bind(user_name)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
