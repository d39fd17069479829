//! Handlers for the `/call-scripts` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::DbId;
use dialdesk_db::models::script::{CallScript, CreateCallScript, UpdateCallScript};
use dialdesk_db::repositories::ScriptRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Response body for script listings.
#[derive(Debug, Serialize)]
pub struct ScriptsResponse {
    pub success: bool,
    pub scripts: Vec<CallScript>,
}

/// Response body for single-script operations.
#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub success: bool,
    pub script: CallScript,
}

/// GET /call-scripts
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<ScriptsResponse>> {
    let scripts = ScriptRepo::list(&state.pool, params.category.as_deref()).await?;
    Ok(Json(ScriptsResponse {
        success: true,
        scripts,
    }))
}

/// POST /call-scripts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCallScript>,
) -> AppResult<Json<ScriptResponse>> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }
    let script = ScriptRepo::create(&state.pool, &input).await?;
    Ok(Json(ScriptResponse {
        success: true,
        script,
    }))
}

/// PUT /call-scripts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCallScript>,
) -> AppResult<Json<ScriptResponse>> {
    let script = ScriptRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Call script", id)))?;
    Ok(Json(ScriptResponse {
        success: true,
        script,
    }))
}

/// DELETE /call-scripts/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if !ScriptRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Call script", id)));
    }
    Ok(Json(Ack::ok()))
}
