//! Handlers for the `/assignments` resource.

use axum::extract::{Query, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::DbId;
use dialdesk_db::models::assignment::Assignment;
use dialdesk_db::repositories::AssignmentRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Query parameters for the assignment listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub agent_id: Option<String>,
}

/// Request body for `POST /assignments/mark-called`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkCalledRequest {
    pub assignment_id: DbId,
    pub outcome: Option<String>,
}

/// Response body for assignment listings.
#[derive(Debug, Serialize)]
pub struct AssignmentsResponse {
    pub success: bool,
    pub assignments: Vec<Assignment>,
}

/// GET /assignments
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<AssignmentsResponse>> {
    let assignments = AssignmentRepo::list(&state.pool, params.agent_id.as_deref()).await?;
    Ok(Json(AssignmentsResponse {
        success: true,
        assignments,
    }))
}

/// POST /assignments/mark-called
///
/// The call-outcome transition: flag the assignment, archive its snapshot,
/// delete the originating pool record. 404 when no un-called assignment
/// exists under the id -- which includes the repeat call on an id that was
/// already flagged or archived.
pub async fn mark_called(
    State(state): State<AppState>,
    Json(input): Json<MarkCalledRequest>,
) -> AppResult<Json<Ack>> {
    AssignmentRepo::mark_called(&state.pool, input.assignment_id, input.outcome.as_deref())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Assignment", input.assignment_id)))?;
    Ok(Json(Ack::ok()))
}
