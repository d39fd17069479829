//! Integration tests for the phone-number claim lease: acquisition,
//! conflicts, TTL expiry, extension and release.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use dialdesk_db::models::claim::ClaimOutcome;
use dialdesk_db::repositories::ClaimRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Acquisition and conflict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn claim_on_free_number_is_acquired(pool: PgPool) {
    let outcome = ClaimRepo::claim(&pool, "555-0100", "u1", "Alice", None, None)
        .await
        .unwrap();
    assert_matches!(outcome, ClaimOutcome::Acquired);

    let claims = ClaimRepo::list(&pool).await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].phone_number, "555-0100");
    assert_eq!(claims[0].user_name, "Alice");
}

#[sqlx::test(migrations = "./migrations")]
async fn claim_held_by_other_agent_reports_holder(pool: PgPool) {
    ClaimRepo::claim(&pool, "555-0100", "u1", "Alice", None, None)
        .await
        .unwrap();

    let outcome = ClaimRepo::claim(&pool, "555-0100", "u2", "Bob", None, None)
        .await
        .unwrap();
    assert_matches!(outcome, ClaimOutcome::Held { ref holder } if holder == "Alice");

    // The hold was not disturbed.
    let claims = ClaimRepo::list(&pool).await.unwrap();
    assert_eq!(claims[0].user_id, "u1");
}

#[sqlx::test(migrations = "./migrations")]
async fn reclaim_by_same_agent_refreshes_the_lease(pool: PgPool) {
    ClaimRepo::claim(&pool, "555-0100", "u1", "Alice", None, None)
        .await
        .unwrap();
    let before = ClaimRepo::list(&pool).await.unwrap()[0].expires_at;

    let outcome = ClaimRepo::claim(&pool, "555-0100", "u1", "Alice", None, None)
        .await
        .unwrap();
    assert_matches!(outcome, ClaimOutcome::Acquired);

    let after = ClaimRepo::list(&pool).await.unwrap()[0].expires_at;
    assert!(after >= before, "re-claim must not shorten the lease");
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn expired_claim_does_not_block_a_new_claimant(pool: PgPool) {
    ClaimRepo::insert_raw(
        &pool,
        "555-0100",
        "u1",
        "Alice",
        Utc::now() - Duration::minutes(1),
    )
    .await
    .unwrap();

    let outcome = ClaimRepo::claim(&pool, "555-0100", "u2", "Bob", None, None)
        .await
        .unwrap();
    assert_matches!(outcome, ClaimOutcome::Acquired);

    let claims = ClaimRepo::list(&pool).await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].user_id, "u2");
}

#[sqlx::test(migrations = "./migrations")]
async fn list_sweeps_expired_claims(pool: PgPool) {
    ClaimRepo::insert_raw(
        &pool,
        "555-0100",
        "u1",
        "Alice",
        Utc::now() - Duration::minutes(1),
    )
    .await
    .unwrap();
    ClaimRepo::claim(&pool, "555-0200", "u2", "Bob", None, None)
        .await
        .unwrap();

    let claims = ClaimRepo::list(&pool).await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].phone_number, "555-0200");
}

// ---------------------------------------------------------------------------
// Extend and release
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn extend_resets_ttl_only_for_the_owner(pool: PgPool) {
    ClaimRepo::claim(&pool, "555-0100", "u1", "Alice", None, None)
        .await
        .unwrap();

    assert!(ClaimRepo::extend(&pool, "555-0100", "u1").await.unwrap());
    assert!(!ClaimRepo::extend(&pool, "555-0100", "u2").await.unwrap());
    assert!(!ClaimRepo::extend(&pool, "555-9999", "u1").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn release_by_non_owner_is_a_silent_noop(pool: PgPool) {
    ClaimRepo::claim(&pool, "555-0100", "u1", "Alice", None, None)
        .await
        .unwrap();

    ClaimRepo::release(&pool, "555-0100", "u2").await.unwrap();
    assert_eq!(ClaimRepo::list(&pool).await.unwrap().len(), 1);

    ClaimRepo::release(&pool, "555-0100", "u1").await.unwrap();
    assert!(ClaimRepo::list(&pool).await.unwrap().is_empty());
}
