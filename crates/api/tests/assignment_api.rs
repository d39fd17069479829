//! End-to-end tests for the allocation and call-outcome flow over HTTP:
//! import, assign, mark-called, recycle, archive listing.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn import_clients(pool: &PgPool, phones: &[&str]) {
    let records: Vec<serde_json::Value> = phones
        .iter()
        .map(|p| json!({ "phoneNumber": p, "name": format!("Client {p}") }))
        .collect();
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/database/clients", json!({ "records": records })).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn assign_to(pool: &PgPool, agent: &str, count: i64) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/database/clients/assign",
        json!({ "agentId": agent, "filters": { "count": count } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_allocates_and_reports_count(pool: PgPool) {
    import_clients(&pool, &["100", "200", "300"]).await;

    let body = assign_to(&pool, "alice", 2).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["assigned"], 2);
    assert_eq!(body["assignments"].as_array().unwrap().len(), 2);
    assert_eq!(body["assignments"][0]["agentId"], "alice");
    assert_eq!(body["assignments"][0]["snapshot"]["phoneNumber"], "100");
    assert!(
        body.get("diagnostic").is_none(),
        "successful allocation carries no diagnostic"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn exhausted_pool_allocation_succeeds_with_diagnostic(pool: PgPool) {
    import_clients(&pool, &["100"]).await;
    assign_to(&pool, "alice", 5).await;

    let body = assign_to(&pool, "bob", 5).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["assigned"], 0);
    assert_eq!(body["diagnostic"]["totalPool"], 1);
    assert_eq!(body["diagnostic"]["alreadyAssigned"], 1);
    assert_eq!(body["diagnostic"]["available"], 0);
    assert!(body["diagnostic"]["suggestion"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn customer_assign_allocates_on_the_default_filter_path(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/database/customers",
        json!({ "records": [{ "phone": "555", "name": "Customer 555" }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/database/customers/assign",
        json!({ "agentId": "alice", "filters": { "count": 1 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["assigned"], 1);
    assert_eq!(body["assignments"][0]["kind"], "customer");
    assert_eq!(body["assignments"][0]["snapshot"]["phone"], "555");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_count_above_the_cap_returns_400(pool: PgPool) {
    import_clients(&pool, &["100"]).await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/database/clients/assign",
        json!({ "agentId": "alice", "filters": { "count": 600 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_without_agent_id_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/database/clients/assign",
        json!({ "agentId": "", "filters": { "count": 1 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Mark-called
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_called_flow_archives_the_call(pool: PgPool) {
    import_clients(&pool, &["100"]).await;
    let body = assign_to(&pool, "alice", 1).await;
    let assignment_id = body["assignments"][0]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/assignments/mark-called",
        json!({ "assignmentId": assignment_id, "outcome": "answered" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    // The call shows up in the archive.
    let app = build_test_app(pool.clone());
    let response = get(app, "/archive").await;
    let body = body_json(response).await;
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["phoneNumber"], "100");
    assert_eq!(records[0]["callOutcome"], "answered");

    // The pool record is gone.
    let app = build_test_app(pool);
    let response = get(app, "/database/clients").await;
    assert!(body_json(response).await["clients"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeat_mark_called_returns_404(pool: PgPool) {
    import_clients(&pool, &["100"]).await;
    let body = assign_to(&pool, "alice", 1).await;
    let assignment_id = body["assignments"][0]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    post_json(
        app,
        "/assignments/mark-called",
        json!({ "assignmentId": assignment_id }),
    )
    .await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/assignments/mark-called",
        json!({ "assignmentId": assignment_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Recycle over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn recycle_agent_returns_numbers_to_the_pool(pool: PgPool) {
    import_clients(&pool, &["100", "200"]).await;
    assign_to(&pool, "alice", 2).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/call-progress/recycle-agent",
        json!({ "agentId": "alice", "type": "clients" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 2);

    // Both numbers are allocatable again.
    let body = assign_to(&pool, "bob", 5).await;
    assert_eq!(body["assigned"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assignments_listing_filters_by_agent(pool: PgPool) {
    import_clients(&pool, &["100", "200"]).await;
    assign_to(&pool, "alice", 1).await;
    assign_to(&pool, "bob", 1).await;

    let app = build_test_app(pool);
    let response = get(app, "/assignments?agentId=alice").await;
    let body = body_json(response).await;
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["agentId"], "alice");
}
