//! Handlers for the phone-number claim (lease) endpoints.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dialdesk_core::types::DbId;
use dialdesk_db::models::claim::{ClaimOutcome, NumberClaim};
use dialdesk_db::repositories::ClaimRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppResult;
use crate::response::Ack;
use crate::state::AppState;

/// Request body shared by claim, extend and release.
///
/// Identity is caller-supplied; there is no session to cross-check it
/// against. Contact fields are optional bookkeeping the dialer sends on
/// claim so the UI can show what the holder is working on.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub phone_number: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub contact_id: Option<DbId>,
    pub contact_type: Option<String>,
}

/// Response body for the claim listing, keyed by phone number.
#[derive(Debug, Serialize)]
pub struct ClaimsResponse {
    pub success: bool,
    pub claims: BTreeMap<String, NumberClaim>,
}

/// GET /number-claims
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ClaimsResponse>> {
    let claims = ClaimRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|c| (c.phone_number.clone(), c))
        .collect();
    Ok(Json(ClaimsResponse {
        success: true,
        claims,
    }))
}

/// POST /claim-number
///
/// 200 with `{claimed: true}` on acquire (or same-user refresh); 409 with
/// the holder's name when another agent holds an unexpired lease.
pub async fn claim(
    State(state): State<AppState>,
    Json(input): Json<ClaimRequest>,
) -> AppResult<Response> {
    let user_name = input.user_name.as_deref().unwrap_or(&input.user_id);
    let outcome = ClaimRepo::claim(
        &state.pool,
        &input.phone_number,
        &input.user_id,
        user_name,
        input.contact_id,
        input.contact_type.as_deref(),
    )
    .await?;

    let response = match outcome {
        ClaimOutcome::Acquired => {
            Json(json!({ "success": true, "claimed": true })).into_response()
        }
        ClaimOutcome::Held { holder } => (
            StatusCode::CONFLICT,
            Json(json!({
                "success": false,
                "claimed": true,
                "claimedBy": holder,
                "error": format!("Number is being called by {holder}"),
            })),
        )
            .into_response(),
    };
    Ok(response)
}

/// POST /extend-number-claim
///
/// `success` reflects whether a matching claim was extended; a miss is not
/// an error status, the dialer just re-claims.
pub async fn extend(
    State(state): State<AppState>,
    Json(input): Json<ClaimRequest>,
) -> AppResult<Json<Ack>> {
    let extended = ClaimRepo::extend(&state.pool, &input.phone_number, &input.user_id).await?;
    Ok(Json(Ack { success: extended }))
}

/// POST /release-number
///
/// Always acknowledges: releasing a claim you do not hold is a no-op.
pub async fn release(
    State(state): State<AppState>,
    Json(input): Json<ClaimRequest>,
) -> AppResult<Json<Ack>> {
    ClaimRepo::release(&state.pool, &input.phone_number, &input.user_id).await?;
    Ok(Json(Ack::ok()))
}
