//! Handlers for the `/call-progress` resource: maintenance sweeps, rollups
//! and the per-agent daily counter.

use axum::extract::{Path, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::PoolKind;
use dialdesk_db::models::progress::{AgentPerformance, DailyProgress};
use dialdesk_db::repositories::{AssignmentRepo, ProgressRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /call-progress/recycle-agent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleAgentRequest {
    pub agent_id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Request body for `POST /call-progress/daily`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUpdateRequest {
    pub agent_id: String,
    pub calls_made: Option<i32>,
    pub target: Option<i32>,
}

/// Request body for `POST /call-progress/check-reset`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResetRequest {
    pub agent_id: String,
}

/// Response body for the two sweep endpoints.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub success: bool,
    pub count: u64,
}

/// Response body for the team rollup.
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub success: bool,
    pub team: Vec<AgentPerformance>,
}

/// Response body for a single-agent rollup.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub success: bool,
    pub performance: AgentPerformance,
}

/// Response body for daily-counter reads and writes.
#[derive(Debug, Serialize)]
pub struct DailyResponse {
    pub success: bool,
    pub progress: DailyProgress,
}

/// Response body for `POST /call-progress/check-reset`.
#[derive(Debug, Serialize)]
pub struct CheckResetResponse {
    pub success: bool,
    pub reset: bool,
}

/// POST /call-progress/recycle
///
/// Return every uncompleted assignment, for every agent and both pools, to
/// its pool. Idempotent: a second run finds nothing.
pub async fn recycle_all(State(state): State<AppState>) -> AppResult<Json<SweepResponse>> {
    let count = AssignmentRepo::recycle(&state.pool, None, None).await?;
    Ok(Json(SweepResponse {
        success: true,
        count,
    }))
}

/// POST /call-progress/recycle-agent
///
/// Same sweep scoped to one agent, optionally to one pool via `type`.
pub async fn recycle_agent(
    State(state): State<AppState>,
    Json(input): Json<RecycleAgentRequest>,
) -> AppResult<Json<SweepResponse>> {
    if input.agent_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "agentId is required".into(),
        )));
    }
    let kind = match input.kind.as_deref() {
        None => None,
        Some(raw) => Some(PoolKind::parse(raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown pool type: {raw}")))
        })?),
    };

    let count = AssignmentRepo::recycle(&state.pool, Some(&input.agent_id), kind).await?;
    Ok(Json(SweepResponse {
        success: true,
        count,
    }))
}

/// POST /call-progress/archive-completed
pub async fn archive_completed(State(state): State<AppState>) -> AppResult<Json<SweepResponse>> {
    let count = AssignmentRepo::archive_completed(&state.pool).await?;
    Ok(Json(SweepResponse {
        success: true,
        count,
    }))
}

/// GET /call-progress/team
pub async fn team(State(state): State<AppState>) -> AppResult<Json<TeamResponse>> {
    let team = ProgressRepo::team_performance(&state.pool).await?;
    Ok(Json(TeamResponse {
        success: true,
        team,
    }))
}

/// GET /call-progress/agent/{agent_id}
pub async fn agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> AppResult<Json<AgentResponse>> {
    let performance = ProgressRepo::agent_performance(&state.pool, &agent_id).await?;
    Ok(Json(AgentResponse {
        success: true,
        performance,
    }))
}

/// GET /call-progress/daily/{agent_id}
///
/// Creates the counter row on first read, so this never 404s.
pub async fn get_daily(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> AppResult<Json<DailyResponse>> {
    let progress = ProgressRepo::get_daily(&state.pool, &agent_id).await?;
    Ok(Json(DailyResponse {
        success: true,
        progress,
    }))
}

/// POST /call-progress/daily
pub async fn update_daily(
    State(state): State<AppState>,
    Json(input): Json<DailyUpdateRequest>,
) -> AppResult<Json<DailyResponse>> {
    if input.agent_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "agentId is required".into(),
        )));
    }
    let progress =
        ProgressRepo::update_daily(&state.pool, &input.agent_id, input.calls_made, input.target)
            .await?;
    Ok(Json(DailyResponse {
        success: true,
        progress,
    }))
}

/// POST /call-progress/check-reset
pub async fn check_reset(
    State(state): State<AppState>,
    Json(input): Json<CheckResetRequest>,
) -> AppResult<Json<CheckResetResponse>> {
    let reset = ProgressRepo::check_reset(&state.pool, &input.agent_id).await?;
    if reset {
        tracing::info!(agent_id = %input.agent_id, "Daily progress counter reset");
    }
    Ok(Json(CheckResetResponse {
        success: true,
        reset,
    }))
}
