//! Route definitions for the `/call-progress` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/call-progress`.
///
/// ```text
/// POST /recycle            -> recycle_all
/// POST /recycle-agent      -> recycle_agent
/// POST /archive-completed  -> archive_completed
/// GET  /team               -> team
/// GET  /agent/{agent_id}   -> agent
/// GET  /daily/{agent_id}   -> get_daily
/// POST /daily              -> update_daily
/// POST /check-reset        -> check_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recycle", post(progress::recycle_all))
        .route("/recycle-agent", post(progress::recycle_agent))
        .route("/archive-completed", post(progress::archive_completed))
        .route("/team", get(progress::team))
        .route("/agent/{agent_id}", get(progress::agent))
        .route("/daily/{agent_id}", get(progress::get_daily))
        .route("/daily", post(progress::update_daily))
        .route("/check-reset", post(progress::check_reset))
}
