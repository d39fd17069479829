//! Integration tests for the settings key/value store and the daily
//! progress counter endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn settings_upsert_then_list_round_trips(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        "/settings",
        json!({ "key": "dialer.autoAdvance", "value": { "enabled": true } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["setting"]["key"], "dialer.autoAdvance");

    // Upserting the same key replaces the value.
    let app = build_test_app(pool.clone());
    put_json(
        app,
        "/settings",
        json!({ "key": "dialer.autoAdvance", "value": { "enabled": false } }),
    )
    .await;

    let app = build_test_app(pool);
    let body = body_json(get(app, "/settings").await).await;
    let settings = body["settings"].as_array().unwrap();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0]["value"]["enabled"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_unknown_setting_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = delete(app, "/settings/no-such-key").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Daily progress counter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn daily_counter_is_created_on_first_read(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/call-progress/daily/alice").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["progress"]["agentId"], "alice");
    assert_eq!(body["progress"]["callsMade"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn daily_counter_update_preserves_absent_fields(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(
        app,
        "/call-progress/daily",
        json!({ "agentId": "alice", "callsMade": 7, "target": 50 }),
    )
    .await;

    // Bumping only callsMade leaves the target alone.
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/call-progress/daily",
        json!({ "agentId": "alice", "callsMade": 8 }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["progress"]["callsMade"], 8);
    assert_eq!(body["progress"]["target"], 50);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn check_reset_is_a_noop_on_the_same_day(pool: PgPool) {
    let app = build_test_app(pool.clone());
    get(app, "/call-progress/daily/alice").await;

    let app = build_test_app(pool);
    let response = post_json(app, "/call-progress/check-reset", json!({ "agentId": "alice" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["reset"], false);
}
