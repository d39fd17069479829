//! Handlers for the `/users` resource (admin user management).

use axum::extract::{Path, State};
use axum::Json;
use dialdesk_core::error::CoreError;
use dialdesk_core::types::DbId;
use dialdesk_db::models::user::{CreateUser, UpdateUser, User};
use dialdesk_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

const ROLES: &[&str] = &["admin", "manager", "agent"];

/// Response body for user listings.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<User>,
}

/// Response body for single-user operations.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

/// GET /users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<Json<UserResponse>> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username and password are required".into(),
        )));
    }
    if let Some(ref role) = input.role {
        validate_role(role)?;
    }

    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(username = %user.username, role = %user.role, "Created user");
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// GET /users/{id}
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// PUT /users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(ref role) = input.role {
        validate_role(role)?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// DELETE /users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("User", id)));
    }
    Ok(Json(Ack::ok()))
}

fn validate_role(role: &str) -> AppResult<()> {
    if ROLES.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'; expected one of admin, manager, agent"
        ))))
    }
}
