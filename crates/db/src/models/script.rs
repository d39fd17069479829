//! Call-script models and DTOs.

use dialdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `call_scripts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallScript {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a call script.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallScript {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
}

/// DTO for updating a call script. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCallScript {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}
