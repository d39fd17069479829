//! Route definitions for the `/database/clients` resource (number pool).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/database/clients`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> import
/// DELETE /        -> wipe (admin)
/// POST   /assign  -> assign (by filter or explicit ids)
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(clients::list).post(clients::import).delete(clients::wipe),
        )
        .route("/assign", post(clients::assign))
        .route("/{id}", put(clients::update).delete(clients::delete))
}
