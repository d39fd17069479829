//! Repository for progress rollups and the `daily_progress` counter.
//!
//! Rollups are derived, never stored: every call recomputes from the
//! assignments and archive tables. The `daily_progress` counter is a
//! separate, opportunistically-updated cache the UI bumps; the two sources
//! may disagree transiently and nothing reconciles them beyond the daily
//! check-reset.

use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::models::progress::{AgentPerformance, DailyProgress};

/// Column list for `daily_progress` queries.
const DP_COLUMNS: &str = "agent_id, calls_made, target, last_reset, updated_at";

/// Rollup and daily-counter operations.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Recompute the team performance rollup: one entry per agent.
    ///
    /// Agents are the union of registered usernames and any agent id seen on
    /// an assignment or archive row, so activity by an agent whose user
    /// record was deleted still shows up.
    pub async fn team_performance(pool: &PgPool) -> Result<Vec<AgentPerformance>, sqlx::Error> {
        let mut agents: BTreeMap<String, AgentPerformance> = BTreeMap::new();

        let usernames: Vec<String> = sqlx::query_scalar("SELECT username FROM users")
            .fetch_all(pool)
            .await?;
        for username in usernames {
            agents.entry(username.clone()).or_insert_with(|| empty(username));
        }

        let assignment_counts: Vec<(String, i64, i64)> = sqlx::query_as(
            "SELECT agent_id, COUNT(*), COUNT(*) FILTER (WHERE called) \
             FROM assignments GROUP BY agent_id",
        )
        .fetch_all(pool)
        .await?;
        for (agent_id, total, completed) in assignment_counts {
            let entry = agents
                .entry(agent_id.clone())
                .or_insert_with(|| empty(agent_id));
            entry.total_assignments = total;
            entry.completed_assignments = completed;
        }

        let call_counts: Vec<(String, i64, i64, i64)> = sqlx::query_as(
            "SELECT agent_id, \
                    COUNT(*) FILTER (WHERE archived_at >= date_trunc('day', NOW())), \
                    COUNT(*) FILTER (WHERE archived_at >= date_trunc('week', NOW())), \
                    COUNT(*) FILTER (WHERE archived_at >= date_trunc('month', NOW())) \
             FROM archive WHERE agent_id IS NOT NULL GROUP BY agent_id",
        )
        .fetch_all(pool)
        .await?;
        for (agent_id, today, week, month) in call_counts {
            let entry = agents
                .entry(agent_id.clone())
                .or_insert_with(|| empty(agent_id));
            entry.calls_today = today;
            entry.calls_this_week = week;
            entry.calls_this_month = month;
        }

        Ok(agents.into_values().collect())
    }

    /// Recompute the rollup for a single agent.
    pub async fn agent_performance(
        pool: &PgPool,
        agent_id: &str,
    ) -> Result<AgentPerformance, sqlx::Error> {
        let (total, completed): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE called) \
             FROM assignments WHERE agent_id = $1",
        )
        .bind(agent_id)
        .fetch_one(pool)
        .await?;

        let (today, week, month): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE archived_at >= date_trunc('day', NOW())), \
                    COUNT(*) FILTER (WHERE archived_at >= date_trunc('week', NOW())), \
                    COUNT(*) FILTER (WHERE archived_at >= date_trunc('month', NOW())) \
             FROM archive WHERE agent_id = $1",
        )
        .bind(agent_id)
        .fetch_one(pool)
        .await?;

        Ok(AgentPerformance {
            agent_id: agent_id.to_string(),
            total_assignments: total,
            completed_assignments: completed,
            calls_today: today,
            calls_this_week: week,
            calls_this_month: month,
        })
    }

    /// Fetch (creating if missing) the daily counter for an agent.
    pub async fn get_daily(pool: &PgPool, agent_id: &str) -> Result<DailyProgress, sqlx::Error> {
        sqlx::query("INSERT INTO daily_progress (agent_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(agent_id)
            .execute(pool)
            .await?;
        sqlx::query_as(&format!(
            "SELECT {DP_COLUMNS} FROM daily_progress WHERE agent_id = $1"
        ))
        .bind(agent_id)
        .fetch_one(pool)
        .await
    }

    /// Upsert the daily counter. Absent fields are left untouched.
    pub async fn update_daily(
        pool: &PgPool,
        agent_id: &str,
        calls_made: Option<i32>,
        target: Option<i32>,
    ) -> Result<DailyProgress, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO daily_progress (agent_id, calls_made, target) \
             VALUES ($1, COALESCE($2, 0), COALESCE($3, 0)) \
             ON CONFLICT (agent_id) DO UPDATE SET \
                 calls_made = COALESCE($2, daily_progress.calls_made), \
                 target = COALESCE($3, daily_progress.target), \
                 updated_at = NOW() \
             RETURNING {DP_COLUMNS}"
        ))
        .bind(agent_id)
        .bind(calls_made)
        .bind(target)
        .fetch_one(pool)
        .await
    }

    /// Zero the counter when the calendar day has rolled over since the last
    /// reset. Returns `true` if a reset happened.
    pub async fn check_reset(pool: &PgPool, agent_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE daily_progress \
             SET calls_made = 0, last_reset = CURRENT_DATE, updated_at = NOW() \
             WHERE agent_id = $1 AND last_reset < CURRENT_DATE",
        )
        .bind(agent_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn empty(agent_id: String) -> AgentPerformance {
    AgentPerformance {
        agent_id,
        total_assignments: 0,
        completed_assignments: 0,
        calls_today: 0,
        calls_this_week: 0,
        calls_this_month: 0,
    }
}
