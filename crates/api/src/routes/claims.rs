//! Route definitions for the number-claim (phone lease) endpoints.
//!
//! These live at the root, not under a resource prefix; the paths are the
//! contract the dialer UI speaks.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::claims;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /number-claims        -> list
/// POST /claim-number         -> claim (409 when held by another agent)
/// POST /extend-number-claim  -> extend
/// POST /release-number       -> release
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/number-claims", get(claims::list))
        .route("/claim-number", post(claims::claim))
        .route("/extend-number-claim", post(claims::extend))
        .route("/release-number", post(claims::release))
}
