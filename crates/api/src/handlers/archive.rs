//! Handlers for the `/archive` resource (terminal call history).

use axum::extract::{Path, Query, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::DbId;
use dialdesk_db::models::archive::ArchiveRecord;
use dialdesk_db::repositories::ArchiveRepo;
use dialdesk_db::{clamp_limit, clamp_offset};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Query parameters for the archive listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub entity_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /archive/restore`.
///
/// The UI has sent the id under both `archiveId` and `recordId` across
/// versions, and the type hint under both `entityType` and `recordType`;
/// all four spellings are accepted. The type hint is advisory, the stored
/// record decides.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    pub archive_id: Option<DbId>,
    pub record_id: Option<DbId>,
    pub entity_type: Option<String>,
    pub record_type: Option<String>,
}

/// Response body for archive listings.
#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub success: bool,
    pub records: Vec<ArchiveRecord>,
}

/// Response body for `POST /archive/restore`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    pub success: bool,
    pub restored_to: String,
}

/// GET /archive
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<ArchiveResponse>> {
    let records = ArchiveRepo::list(
        &state.pool,
        params.entity_type.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ArchiveResponse {
        success: true,
        records,
    }))
}

/// POST /archive/restore
pub async fn restore(
    State(state): State<AppState>,
    Json(input): Json<RestoreRequest>,
) -> AppResult<Json<RestoreResponse>> {
    let id = input
        .archive_id
        .or(input.record_id)
        .ok_or_else(|| AppError::Core(CoreError::Validation("archiveId is required".into())))?;

    if let Some(hint) = input.entity_type.as_deref().or(input.record_type.as_deref()) {
        tracing::debug!(id, hint, "Restore request carried a type hint");
    }

    let kind = ArchiveRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Archive record", id)))?;

    tracing::info!(id, pool = %kind, "Restored archive record");
    Ok(Json(RestoreResponse {
        success: true,
        restored_to: kind.to_string(),
    }))
}

/// DELETE /archive/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if !ArchiveRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Archive record", id)));
    }
    Ok(Json(Ack::ok()))
}
