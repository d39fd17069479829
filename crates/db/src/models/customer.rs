//! Existing-customer pool models and DTOs.

use dialdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `customers` table.
///
/// `interaction_completed` is a customer-care flag and is independent of the
/// call lifecycle: a customer can be marked completed without ever being
/// archived, and vice versa.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: DbId,
    pub name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub customer_type: Option<String>,
    pub flight_info: Option<serde_json::Value>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub assigned_at: Option<Timestamp>,
    pub assigned_by: Option<String>,
    pub interaction_completed: bool,
    pub notes: serde_json::Value,
    pub recycled_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for one record in a bulk customer import.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    pub name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub customer_type: Option<String>,
    pub flight_info: Option<serde_json::Value>,
}

/// DTO for updating a customer record. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub customer_type: Option<String>,
    pub flight_info: Option<serde_json::Value>,
}

/// DTO for appending a note to a customer's history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNote {
    pub text: String,
    pub author: Option<String>,
}
