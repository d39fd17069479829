//! Route definitions for the `/database/customers` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// Routes mounted at `/database/customers`.
///
/// ```text
/// GET  /                -> list
/// POST /                -> import
/// POST /assign          -> assign (by filter or explicit ids)
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST /{id}/notes      -> add_note
/// POST /{id}/complete   -> set_completed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::import))
        .route("/assign", post(customers::assign))
        .route("/{id}", put(customers::update).delete(customers::delete))
        .route("/{id}/notes", post(customers::add_note))
        .route("/{id}/complete", post(customers::set_completed))
}
