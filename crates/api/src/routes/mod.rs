pub mod archive;
pub mod assignments;
pub mod auth;
pub mod claims;
pub mod clients;
pub mod customers;
pub mod email;
pub mod health;
pub mod progress;
pub mod promotions;
pub mod scripts;
pub mod settings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Paths are mounted at the root (no version prefix) because they are the
/// contract the frontend already speaks:
///
/// ```text
/// /health                                  liveness + database ping
///
/// /auth/login                              login (plaintext handshake)
///
/// /users                                   list, create
/// /users/{id}                              get, update, delete
///
/// /database/clients                        list, bulk import, wipe (DELETE)
/// /database/clients/assign                 allocate by filter or ids
/// /database/clients/{id}                   update, delete
///
/// /database/customers                      list, bulk import
/// /database/customers/assign               allocate by filter or ids
/// /database/customers/{id}                 update, delete
/// /database/customers/{id}/notes           append note
/// /database/customers/{id}/complete        set interaction-completed flag
///
/// /assignments                             list (?agentId=)
/// /assignments/mark-called                 call-outcome transition
///
/// /number-claims                           list active claims
/// /claim-number                            acquire claim (409 when held)
/// /extend-number-claim                     reset claim TTL
/// /release-number                          release own claim
///
/// /call-progress/recycle                   recycle all uncompleted
/// /call-progress/recycle-agent             recycle one agent's uncompleted
/// /call-progress/archive-completed         move completed to archive
/// /call-progress/team                      team performance rollup
/// /call-progress/agent/{agent_id}          single-agent rollup
/// /call-progress/daily/{agent_id}          daily counter (GET)
/// /call-progress/daily                     daily counter upsert (POST)
/// /call-progress/check-reset               midnight rollover reset
///
/// /archive                                 list (?entityType=)
/// /archive/restore                         restore into origin pool
/// /archive/{id}                            delete
///
/// /call-scripts                            list, create
/// /call-scripts/{id}                       update, delete
///
/// /promotions                              list, create
/// /promotions/{id}                         update, delete
///
/// /settings                                list (GET), upsert (PUT)
/// /settings/{key}                          delete
///
/// /send-email                              validate + log outbound mail
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(claims::router())
        .merge(email::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/database/clients", clients::router())
        .nest("/database/customers", customers::router())
        .nest("/assignments", assignments::router())
        .nest("/call-progress", progress::router())
        .nest("/archive", archive::router())
        .nest("/call-scripts", scripts::router())
        .nest("/promotions", promotions::router())
        .nest("/settings", settings::router())
}
