//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_db::models::user::User;
use dialdesk_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

/// POST /auth/login
///
/// Plaintext-password equality check against the stored user record. There
/// is no token or session model: after login, identity is re-asserted per
/// request from client-supplied fields.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username and password are required".into(),
        )));
    }

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    if user.password != input.password {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    tracing::info!(username = %user.username, role = %user.role, "User logged in");
    Ok(Json(LoginResponse {
        success: true,
        user,
    }))
}
