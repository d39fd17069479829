//! Route definitions for the `/archive` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::archive;
use crate::state::AppState;

/// Routes mounted at `/archive`.
///
/// ```text
/// GET    /         -> list (?entityType=, limit, offset)
/// POST   /restore  -> restore
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(archive::list))
        .route("/restore", post(archive::restore))
        .route("/{id}", delete(archive::delete))
}
