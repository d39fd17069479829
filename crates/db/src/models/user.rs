//! User entity models and DTOs.

use dialdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// The password column is plaintext, inherited from the source system; it is
/// never serialized into responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub permissions: serde_json::Value,
    pub daily_target: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
    pub permissions: Option<serde_json::Value>,
    pub daily_target: Option<i32>,
}

/// DTO for updating a user. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub password: Option<String>,
    pub role: Option<String>,
    pub permissions: Option<serde_json::Value>,
    pub daily_target: Option<i32>,
}
