//! Handlers for the `/settings` key/value resource.

use axum::extract::{Path, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_db::models::setting::Setting;
use dialdesk_db::repositories::SettingsRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Request body for `PUT /settings`.
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    pub key: String,
    pub value: serde_json::Value,
}

/// Response body for the settings listing.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: Vec<Setting>,
}

/// Response body for a single-setting upsert.
#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub success: bool,
    pub setting: Setting,
}

/// GET /settings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<SettingsResponse>> {
    let settings = SettingsRepo::list(&state.pool).await?;
    Ok(Json(SettingsResponse {
        success: true,
        settings,
    }))
}

/// PUT /settings
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<UpsertRequest>,
) -> AppResult<Json<SettingResponse>> {
    if input.key.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "key is required".into(),
        )));
    }
    let setting = SettingsRepo::upsert(&state.pool, &input.key, &input.value).await?;
    Ok(Json(SettingResponse {
        success: true,
        setting,
    }))
}

/// DELETE /settings/{key}
pub async fn delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Ack>> {
    if !SettingsRepo::delete(&state.pool, &key).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Setting",
            key,
        }));
    }
    Ok(Json(Ack::ok()))
}
