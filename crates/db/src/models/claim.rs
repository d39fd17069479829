//! Number-claim (phone lease) models.

use dialdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `number_claims` table.
///
/// At most one row exists per phone number (primary key); a row whose
/// `expires_at` is in the past is inert and gets swept on the next read.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberClaim {
    pub phone_number: String,
    pub user_id: String,
    pub user_name: String,
    pub contact_id: Option<DbId>,
    pub contact_type: Option<String>,
    pub claimed_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Outcome of a claim attempt.
#[derive(Debug)]
pub enum ClaimOutcome {
    /// The claim was acquired (or refreshed by the same user).
    Acquired,
    /// An unexpired claim by another user blocks this one; carries the
    /// current holder's display name for the UI message.
    Held { holder: String },
}
