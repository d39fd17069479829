//! Route definitions for the `/call-scripts` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Routes mounted at `/call-scripts`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scripts::list).post(scripts::create))
        .route("/{id}", put(scripts::update).delete(scripts::delete))
}
