//! Integration tests for the phone-number claim endpoints, in particular
//! the 409 conflict contract the dialer UI depends on.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

fn claim_body(phone: &str, user_id: &str, user_name: &str) -> serde_json::Value {
    json!({
        "phoneNumber": phone,
        "userId": user_id,
        "userName": user_name,
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn claim_free_number_succeeds(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/claim-number", claim_body("555-0100", "u1", "Alice")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["claimed"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn claim_held_number_returns_409_with_holder(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/claim-number", claim_body("555-0100", "u1", "Alice")).await;

    let app = build_test_app(pool);
    let response = post_json(app, "/claim-number", claim_body("555-0100", "u2", "Bob")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["claimed"], true);
    assert_eq!(body["claimedBy"], "Alice");
    assert_eq!(body["error"], "Number is being called by Alice");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn released_number_is_claimable_again(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/claim-number", claim_body("555-0100", "u1", "Alice")).await;

    let app = build_test_app(pool.clone());
    let response = post_json(app, "/release-number", claim_body("555-0100", "u1", "Alice")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool);
    let response = post_json(app, "/claim-number", claim_body("555-0100", "u2", "Bob")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn extend_without_a_claim_reports_failure_without_error_status(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/extend-number-claim",
        claim_body("555-0100", "u1", "Alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn claim_listing_is_keyed_by_phone_number(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/claim-number", claim_body("555-0100", "u1", "Alice")).await;

    let app = build_test_app(pool);
    let response = get(app, "/number-claims").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["claims"]["555-0100"]["userName"], "Alice");
}
