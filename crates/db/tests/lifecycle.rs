//! Integration tests for the call lifecycle: the mark-called transition,
//! the recycle and archive-completed sweeps, and restore from the archive.

use dialdesk_core::types::PoolKind;
use dialdesk_db::models::assignment::AllocationFilter;
use dialdesk_db::models::client::CreateClient;
use dialdesk_db::models::customer::CreateCustomer;
use dialdesk_db::repositories::{ArchiveRepo, AssignmentRepo, ClientRepo, CustomerRepo};
use sqlx::PgPool;

fn client(phone: &str) -> CreateClient {
    CreateClient {
        phone_number: phone.to_string(),
        name: Some(format!("Client {phone}")),
        customer_type: None,
        airplane: None,
    }
}

fn customer(phone: &str) -> CreateCustomer {
    CreateCustomer {
        name: Some(format!("Customer {phone}")),
        phone: phone.to_string(),
        email: None,
        customer_type: None,
        flight_info: None,
    }
}

async fn seed_and_assign(pool: &PgPool, kind: PoolKind, agent: &str, phones: &[&str]) -> Vec<i64> {
    match kind {
        PoolKind::Client => {
            let records: Vec<CreateClient> = phones.iter().map(|p| client(p)).collect();
            ClientRepo::import(pool, &records).await.unwrap();
        }
        PoolKind::Customer => {
            let records: Vec<CreateCustomer> = phones.iter().map(|p| customer(p)).collect();
            CustomerRepo::import(pool, &records).await.unwrap();
        }
    }
    let filter = AllocationFilter {
        count: Some(phones.len() as i64),
        ..Default::default()
    };
    let outcome = AssignmentRepo::allocate_by_filter(pool, kind, agent, &filter)
        .await
        .unwrap();
    assert_eq!(outcome.assigned(), phones.len());
    outcome.assignments.iter().map(|a| a.id).collect()
}

// ---------------------------------------------------------------------------
// Mark-called
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn mark_called_archives_and_removes_the_pool_record(pool: PgPool) {
    let ids = seed_and_assign(&pool, PoolKind::Client, "alice", &["100"]).await;

    let result = AssignmentRepo::mark_called(&pool, ids[0], Some("answered"))
        .await
        .unwrap()
        .expect("first mark-called succeeds");
    assert!(result.pool_record_deleted);
    assert!(result.assignment.called);
    assert!(result.assignment.called_at.is_some());

    // The assignment row remains, flagged.
    let assignment = AssignmentRepo::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
    assert!(assignment.called);
    assert_eq!(assignment.status, "completed");
    assert_eq!(assignment.outcome.as_deref(), Some("answered"));

    // The pool record is gone.
    assert!(ClientRepo::list(&pool, None, None, 100, 0).await.unwrap().is_empty());

    // One archive row with the snapshot payload.
    let archived = ArchiveRepo::list(&pool, None, 100, 0).await.unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].entity_type, "client");
    assert_eq!(archived[0].phone_number.as_deref(), Some("100"));
    assert_eq!(archived[0].agent_id.as_deref(), Some("alice"));
    assert_eq!(archived[0].payload["phoneNumber"].as_str(), Some("100"));
}

#[sqlx::test(migrations = "./migrations")]
async fn repeated_mark_called_is_rejected(pool: PgPool) {
    let ids = seed_and_assign(&pool, PoolKind::Client, "alice", &["100"]).await;

    assert!(AssignmentRepo::mark_called(&pool, ids[0], None)
        .await
        .unwrap()
        .is_some());
    assert!(
        AssignmentRepo::mark_called(&pool, ids[0], None)
            .await
            .unwrap()
            .is_none(),
        "second transition on the same assignment must not archive again"
    );

    // Still exactly one archive row.
    assert_eq!(ArchiveRepo::list(&pool, None, 100, 0).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_called_on_unknown_assignment_returns_none(pool: PgPool) {
    assert!(AssignmentRepo::mark_called(&pool, 999, None)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Recycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn recycle_returns_uncompleted_assignments_to_the_pool(pool: PgPool) {
    let ids = seed_and_assign(&pool, PoolKind::Client, "alice", &["100", "200"]).await;
    AssignmentRepo::mark_called(&pool, ids[0], None).await.unwrap();

    let recycled = AssignmentRepo::recycle(&pool, None, None).await.unwrap();
    assert_eq!(recycled, 1, "only the uncompleted assignment is recycled");

    // The recycled record is back and available.
    let clients = ClientRepo::list(&pool, Some("available"), None, 100, 0)
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].phone_number, "200");
    assert!(clients[0].recycled_at.is_some());
    assert!(clients[0].assigned_to.is_none());

    // Only the completed assignment remains.
    let remaining = AssignmentRepo::list(&pool, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].called);
}

#[sqlx::test(migrations = "./migrations")]
async fn recycle_scoped_to_agent_leaves_other_agents_alone(pool: PgPool) {
    seed_and_assign(&pool, PoolKind::Client, "alice", &["100"]).await;
    seed_and_assign(&pool, PoolKind::Client, "bob", &["200"]).await;

    let recycled = AssignmentRepo::recycle(&pool, Some("alice"), Some(PoolKind::Client))
        .await
        .unwrap();
    assert_eq!(recycled, 1);

    let remaining = AssignmentRepo::list(&pool, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].agent_id, "bob");
}

#[sqlx::test(migrations = "./migrations")]
async fn recycle_twice_is_idempotent(pool: PgPool) {
    seed_and_assign(&pool, PoolKind::Client, "alice", &["100"]).await;

    assert_eq!(AssignmentRepo::recycle(&pool, None, None).await.unwrap(), 1);
    assert_eq!(AssignmentRepo::recycle(&pool, None, None).await.unwrap(), 0);

    // Recycling did not duplicate the pool record.
    assert_eq!(
        ClientRepo::list(&pool, None, None, 100, 0).await.unwrap().len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Archive-completed sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn archive_completed_moves_only_called_assignments(pool: PgPool) {
    let ids = seed_and_assign(&pool, PoolKind::Client, "alice", &["100", "200"]).await;
    AssignmentRepo::mark_called(&pool, ids[0], Some("answered"))
        .await
        .unwrap();

    let moved = AssignmentRepo::archive_completed(&pool).await.unwrap();
    assert_eq!(moved, 1);

    // The completed assignment row is gone; the open one survives.
    let remaining = AssignmentRepo::list(&pool, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(!remaining[0].called);

    // Mark-called already archived once; the sweep adds a second row for the
    // same call. Duplicates are accepted here.
    assert_eq!(ArchiveRepo::list(&pool, None, 100, 0).await.unwrap().len(), 2);

    // Re-running finds nothing.
    assert_eq!(AssignmentRepo::archive_completed(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn restore_mints_a_fresh_available_record(pool: PgPool) {
    let ids = seed_and_assign(&pool, PoolKind::Client, "alice", &["100"]).await;
    AssignmentRepo::mark_called(&pool, ids[0], None).await.unwrap();

    let archived = ArchiveRepo::list(&pool, None, 100, 0).await.unwrap();
    let kind = ArchiveRepo::restore(&pool, archived[0].id)
        .await
        .unwrap()
        .expect("archived record restores");
    assert_eq!(kind, PoolKind::Client);

    // Back in the pool, unassigned and available.
    let clients = ClientRepo::list(&pool, None, None, 100, 0).await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].phone_number, "100");
    assert_eq!(clients[0].status, "available");
    assert!(clients[0].assigned_to.is_none());

    // The archive row was consumed.
    assert!(ArchiveRepo::list(&pool, None, 100, 0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn restore_customer_record_goes_back_to_the_customer_pool(pool: PgPool) {
    let ids = seed_and_assign(&pool, PoolKind::Customer, "alice", &["555"]).await;
    AssignmentRepo::mark_called(&pool, ids[0], None).await.unwrap();

    let archived = ArchiveRepo::list(&pool, None, 100, 0).await.unwrap();
    let kind = ArchiveRepo::restore(&pool, archived[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kind, PoolKind::Customer);

    let customers = CustomerRepo::list(&pool, None, None, 100, 0).await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].phone, "555");
    assert_eq!(customers[0].status, "available");
}

#[sqlx::test(migrations = "./migrations")]
async fn restore_unknown_archive_id_returns_none(pool: PgPool) {
    assert!(ArchiveRepo::restore(&pool, 999).await.unwrap().is_none());
}
