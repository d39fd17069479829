//! Route definition for the outbound-mail stub.

use axum::routing::post;
use axum::Router;

use crate::handlers::email;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /send-email -> send
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/send-email", post(email::send))
}
