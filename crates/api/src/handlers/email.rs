//! Outbound-mail stub.
//!
//! Validates and logs the send request without delivering anything; there is
//! no SMTP relay in this deployment. The endpoint keeps the frontend's send
//! flow working end to end.

use axum::extract::State;
use axum::Json;
use dialdesk_core::error::CoreError;
use serde::Deserialize;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Request body for `POST /send-email`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// POST /send-email
pub async fn send(
    State(_state): State<AppState>,
    Json(input): Json<SendEmailRequest>,
) -> AppResult<Json<Ack>> {
    if !input.to.validate_email() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid recipient address: {}",
            input.to
        ))));
    }
    if input.subject.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "subject is required".into(),
        )));
    }

    tracing::info!(
        to = %input.to,
        subject = %input.subject,
        body_len = input.body.len(),
        "Email send requested (delivery not configured, logged only)"
    );
    Ok(Json(Ack::ok()))
}
