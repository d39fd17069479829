//! Handlers for the `/promotions` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::DbId;
use dialdesk_db::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use dialdesk_db::repositories::PromotionRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// Response body for promotion listings.
#[derive(Debug, Serialize)]
pub struct PromotionsResponse {
    pub success: bool,
    pub promotions: Vec<Promotion>,
}

/// Response body for single-promotion operations.
#[derive(Debug, Serialize)]
pub struct PromotionResponse {
    pub success: bool,
    pub promotion: Promotion,
}

/// GET /promotions
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<PromotionsResponse>> {
    let promotions = PromotionRepo::list(&state.pool, params.active_only).await?;
    Ok(Json(PromotionsResponse {
        success: true,
        promotions,
    }))
}

/// POST /promotions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePromotion>,
) -> AppResult<Json<PromotionResponse>> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }
    let promotion = PromotionRepo::create(&state.pool, &input).await?;
    Ok(Json(PromotionResponse {
        success: true,
        promotion,
    }))
}

/// PUT /promotions/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromotion>,
) -> AppResult<Json<PromotionResponse>> {
    let promotion = PromotionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Promotion", id)))?;
    Ok(Json(PromotionResponse {
        success: true,
        promotion,
    }))
}

/// DELETE /promotions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if !PromotionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Promotion", id)));
    }
    Ok(Json(Ack::ok()))
}
