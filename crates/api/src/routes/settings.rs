//! Route definitions for the `/settings` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /       -> list
/// PUT    /       -> upsert
/// DELETE /{key}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list).put(settings::upsert))
        .route("/{key}", delete(settings::delete))
}
