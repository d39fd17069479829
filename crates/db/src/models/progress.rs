//! Progress rollup and daily-counter models.

use chrono::NaiveDate;
use dialdesk_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `daily_progress` table.
///
/// This is the opportunistic per-agent counter the UI bumps after each call.
/// It is not the source of truth; the rollup queries recompute from the
/// assignments and archive tables and the two may disagree transiently.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub agent_id: String,
    pub calls_made: i32,
    pub target: i32,
    pub last_reset: NaiveDate,
    pub updated_at: Timestamp,
}

/// Recomputed performance rollup for one agent.
///
/// Derived on every request; nothing here is stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
    pub agent_id: String,
    pub total_assignments: i64,
    pub completed_assignments: i64,
    pub calls_today: i64,
    pub calls_this_week: i64,
    pub calls_this_month: i64,
}
