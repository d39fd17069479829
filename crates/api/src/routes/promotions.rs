//! Route definitions for the `/promotions` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::promotions;
use crate::state::AppState;

/// Routes mounted at `/promotions`.
///
/// ```text
/// GET    /      -> list (?activeOnly=)
/// POST   /      -> create
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(promotions::list).post(promotions::create))
        .route("/{id}", put(promotions::update).delete(promotions::delete))
}
