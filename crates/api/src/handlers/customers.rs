//! Handlers for the `/database/customers` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::{DbId, PoolKind};
use dialdesk_db::models::assignment::{AllocationDiagnostic, AllocationFilter, Assignment};
use dialdesk_db::models::customer::{AddNote, CreateCustomer, Customer, UpdateCustomer};
use dialdesk_db::repositories::{AssignmentRepo, CustomerRepo};
use dialdesk_db::{clamp_limit, clamp_offset};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Query parameters for the customer listing endpoint.
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
    pub records: Vec<CreateCustomer>,
}

/// Request body for `POST /database/customers/assign`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub agent_id: String,
    pub customer_ids: Option<Vec<DbId>>,
    pub filters: Option<AllocationFilter>,
}

/// Request body for the interaction-completed toggle.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    /// Defaults to `true`; send `false` to re-open.
    pub completed: Option<bool>,
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

/// Response body for customer listings.
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    pub success: bool,
    pub customers: Vec<Customer>,
}

/// Response body for single-customer operations.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub success: bool,
    pub customer: Customer,
}

/// Response body for bulk import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported: u64,
}

/// GET /database/customers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<CustomersResponse>> {
    let customers = CustomerRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.assigned_to.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(CustomersResponse {
        success: true,
        customers,
    }))
}

/// POST /database/customers
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
        if record.phone.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "every record needs a phone".into(),
            )));
        }
    }

    let imported = CustomerRepo::import(&state.pool, &input.records).await?;
    Ok(Json(ImportResponse {
        success: true,
        imported,
    }))
}

/// POST /database/customers/assign
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

    let outcome = match input.customer_ids {
        Some(ref ids) if !ids.is_empty() => {
            AssignmentRepo::allocate_by_ids(&state.pool, PoolKind::Customer, &input.agent_id, ids)
                .await?
        }
        _ => {
            let filter = input.filters.unwrap_or_default();
            AssignmentRepo::allocate_by_filter(
                &state.pool,
                PoolKind::Customer,
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

/// PUT /database/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Customer", id)))?;
    Ok(Json(CustomerResponse {
        success: true,
        customer,
    }))
}

/// POST /database/customers/{id}/notes
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddNote>,
) -> AppResult<Json<CustomerResponse>> {
    if input.text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "note text must not be empty".into(),
        )));
    }

    let customer = CustomerRepo::add_note(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Customer", id)))?;
    Ok(Json(CustomerResponse {
        success: true,
        customer,
    }))
}

/// POST /database/customers/{id}/complete
pub async fn set_completed(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteRequest>,
) -> AppResult<Json<CustomerResponse>> {
    let completed = input.completed.unwrap_or(true);
    let customer = CustomerRepo::set_interaction_completed(&state.pool, id, completed)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Customer", id)))?;
    Ok(Json(CustomerResponse {
        success: true,
        customer,
    }))
}

/// DELETE /database/customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if !CustomerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Customer", id)));
    }
    Ok(Json(Ack::ok()))
}
