//! Prospective-client pool models and DTOs.

use dialdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table (the number pool).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: DbId,
    pub phone_number: String,
    pub name: Option<String>,
    pub customer_type: Option<String>,
    pub airplane: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub assigned_at: Option<Timestamp>,
    pub recycled_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for one record in a bulk client import.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    pub phone_number: String,
    pub name: Option<String>,
    pub customer_type: Option<String>,
    pub airplane: Option<String>,
}

/// DTO for updating a client record. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub customer_type: Option<String>,
    pub airplane: Option<String>,
}
