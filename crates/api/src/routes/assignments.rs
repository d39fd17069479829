//! Route definitions for the `/assignments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// GET  /             -> list (?agentId=)
/// POST /mark-called  -> mark_called
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assignments::list))
        .route("/mark-called", post(assignments::mark_called))
}
