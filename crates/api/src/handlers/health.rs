//! Health check handler.

use axum::extract::State;
use axum::Json;
use dialdesk_core::error::CoreError;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
}

/// GET /health
///
/// Liveness check with a database round-trip. Returns 503 when the store is
/// unreachable (the server is up but cannot serve data yet).
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    dialdesk_db::health_check(&state.pool).await.map_err(|err| {
        tracing::error!(error = %err, "Health check failed");
        AppError::Core(CoreError::Unavailable(
            "Database is unreachable; retry shortly".into(),
        ))
    })?;

    Ok(Json(HealthResponse {
        success: true,
        status: "ok",
    }))
}
