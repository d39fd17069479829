//! Assignment (per-agent call queue) models and allocation DTOs.

use dialdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assignments` table.
///
/// `snapshot` is the pool record as it looked at allocation time; it is the
/// snapshot, not a live join, that later gets archived.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: DbId,
    pub client_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    pub kind: String,
    pub snapshot: serde_json::Value,
    pub agent_id: String,
    pub assigned_at: Timestamp,
    pub status: String,
    pub called: bool,
    pub called_at: Option<Timestamp>,
    pub outcome: Option<String>,
    pub created_at: Timestamp,
}

/// Filter criteria for filter-based allocation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationFilter {
    pub customer_type: Option<String>,
    pub airplane: Option<String>,
    pub count: Option<i64>,
}

/// Diagnostic returned when an allocation matches zero records.
///
/// This is a first-class part of the response contract: the UI's empty-state
/// messaging distinguishes an empty pool from an exhausted one from a filter
/// that matches nothing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationDiagnostic {
    pub total_pool: i64,
    pub already_assigned: i64,
    pub available: i64,
    pub suggestion: String,
}

/// Result of an allocation call: the created assignments, or a diagnostic
/// explaining why nothing could be allocated.
#[derive(Debug)]
pub struct AllocationOutcome {
    pub assignments: Vec<Assignment>,
    pub diagnostic: Option<AllocationDiagnostic>,
}

impl AllocationOutcome {
    pub fn assigned(&self) -> usize {
        self.assignments.len()
    }
}
