//! Archive (terminal call history) models.

use dialdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `archive` table.
///
/// Write-once: nothing updates an archive row after insertion. Restoring
/// moves it back into its origin pool and deletes it here.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    pub id: DbId,
    pub entity_type: String,
    pub source_id: Option<DbId>,
    pub phone_number: Option<String>,
    pub agent_id: Option<String>,
    pub payload: serde_json::Value,
    #[serde(rename = "callOutcome")]
    pub outcome: Option<String>,
    pub called_at: Option<Timestamp>,
    pub archived_at: Timestamp,
}
