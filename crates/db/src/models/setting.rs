//! Settings key/value models.

use dialdesk_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: Timestamp,
}
