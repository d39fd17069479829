use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// The pool is constructed by the process entry point and injected here;
/// cloning is cheap (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dialdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
