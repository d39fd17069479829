//! Promotion models and DTOs.

use dialdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `promotions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a promotion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromotion {
    pub title: String,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// DTO for updating a promotion. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromotion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}
