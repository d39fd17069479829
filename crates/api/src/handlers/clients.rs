//! Handlers for the `/database/clients` resource (number pool).

use axum::extract::{Path, Query, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::{DbId, PoolKind};
use dialdesk_db::models::assignment::{AllocationDiagnostic, AllocationFilter, Assignment};
use dialdesk_db::models::client::{Client, CreateClient, UpdateClient};
use dialdesk_db::repositories::{AssignmentRepo, ClientRepo};
use dialdesk_db::{clamp_limit, clamp_offset};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Query parameters for the client listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for bulk import.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub records: Vec<CreateClient>,
}

/// Request body for `POST /database/clients/assign`.
///
/// Exactly one allocation mode applies: explicit `clientIds` win over
/// `filters` when both are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub agent_id: String,
    pub client_ids: Option<Vec<DbId>>,
    pub filters: Option<AllocationFilter>,
}

/// Response body for allocation calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignResponse {
    pub success: bool,
    pub assigned: usize,
    pub assignments: Vec<Assignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<AllocationDiagnostic>,
}

/// Response body for client listings.
#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub success: bool,
    pub clients: Vec<Client>,
}

/// Response body for single-client operations.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub success: bool,
    pub client: Client,
}

/// Response body for bulk import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported: u64,
}

/// Response body for the admin wipe.
#[derive(Debug, Serialize)]
pub struct WipeResponse {
    pub success: bool,
    pub deleted: u64,
}

/// GET /database/clients
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<ClientsResponse>> {
    let clients = ClientRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.assigned_to.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ClientsResponse {
        success: true,
        clients,
    }))
}

/// POST /database/clients
///
/// Bulk-import number records.
pub async fn import(
    State(state): State<AppState>,
    Json(input): Json<ImportRequest>,
) -> AppResult<Json<ImportResponse>> {
    if input.records.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "records must not be empty".into(),
        )));
    }
    for record in &input.records {
        if record.phone_number.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "every record needs a phoneNumber".into(),
            )));
        }
    }

    let imported = ClientRepo::import(&state.pool, &input.records).await?;
    Ok(Json(ImportResponse {
        success: true,
        imported,
    }))
}

/// POST /database/clients/assign
///
/// Allocate number records to an agent, either by explicit ids or by
/// filter + count. A zero-record allocation still succeeds and carries the
/// diagnostic the UI uses for its empty-state message.
pub async fn assign(
    State(state): State<AppState>,
    Json(input): Json<AssignRequest>,
) -> AppResult<Json<AssignResponse>> {
    if input.agent_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "agentId is required".into(),
        )));
    }
    super::validate_count(input.filters.as_ref())?;

    let outcome = match input.client_ids {
        Some(ref ids) if !ids.is_empty() => {
            AssignmentRepo::allocate_by_ids(&state.pool, PoolKind::Client, &input.agent_id, ids)
                .await?
        }
        _ => {
            let filter = input.filters.unwrap_or_default();
            AssignmentRepo::allocate_by_filter(
                &state.pool,
                PoolKind::Client,
                &input.agent_id,
                &filter,
            )
            .await?
        }
    };

    Ok(Json(AssignResponse {
        success: true,
        assigned: outcome.assigned(),
        assignments: outcome.assignments,
        diagnostic: outcome.diagnostic,
    }))
}

/// PUT /database/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<ClientResponse>> {
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Client", id)))?;
    Ok(Json(ClientResponse {
        success: true,
        client,
    }))
}

/// DELETE /database/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if !ClientRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Client", id)));
    }
    Ok(Json(Ack::ok()))
}

/// DELETE /database/clients
///
/// Admin wipe of the whole number pool.
pub async fn wipe(State(state): State<AppState>) -> AppResult<Json<WipeResponse>> {
    let deleted = ClientRepo::wipe(&state.pool).await?;
    Ok(Json(WipeResponse {
        success: true,
        deleted,
    }))
}
