//! Repository for the `assignments` table: allocation, the call-outcome
//! transition, and the recycle / archive-completed maintenance sweeps.
//!
//! Allocation is a pick-then-assign sequence. The assign statement re-checks
//! the unassigned predicate, so a single sequential caller never assigns an
//! already-assigned record; two concurrent allocators can still both pick the
//! same record before either write lands. That double-assignment window is a
//! documented property of the system, preserved rather than patched.

use dialdesk_core::types::{DbId, PoolKind};
use sqlx::PgPool;

use crate::models::assignment::{
    AllocationDiagnostic, AllocationFilter, AllocationOutcome, Assignment,
};

/// Column list for `assignments` queries.
const COLUMNS: &str = "id, client_id, customer_id, kind, snapshot, agent_id, assigned_at, \
                       status, called, called_at, outcome, created_at";

/// Predicate selecting unassigned pool records. Status may be absent, empty
/// or 'available' depending on how the record was imported.
const UNASSIGNED: &str = "(status IS NULL OR status = '' OR status = 'available') \
                          AND (assigned_to IS NULL OR assigned_to = '')";

/// Maximum records a single filter-based allocation may hand out. The HTTP
/// layer rejects requests above this; the clamp here is the backstop.
pub const MAX_ALLOCATION: i64 = 500;

/// Result of the call-outcome transition.
#[derive(Debug)]
pub struct MarkCalledOutcome {
    pub assignment: Assignment,
    /// Whether the originating pool record was found and deleted (by id or
    /// by the phone + assignee fallback).
    pub pool_record_deleted: bool,
}

/// Allocation and lifecycle operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    // ── Listing ─────────────────────────────────────────────────────────

    /// List assignments, optionally scoped to one agent. Newest first.
    pub async fn list(
        pool: &PgPool,
        agent_id: Option<&str>,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM assignments \
             WHERE ($1::text IS NULL OR agent_id = $1) \
             ORDER BY assigned_at DESC, id DESC"
        ))
        .bind(agent_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch one assignment by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM assignments WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // ── Allocation ──────────────────────────────────────────────────────

    /// Allocate up to `filter.count` unassigned pool records matching the
    /// filter to `agent_id`, in insertion (primary-key) order.
    ///
    /// The pick query is built per pool: `airplane` is a client-pool
    /// attribute, so that predicate only applies there and is ignored for
    /// customer allocations.
    ///
    /// When nothing matches, the outcome carries a diagnostic with pool
    /// totals and a suggestion string; the UI's empty-state messaging
    /// depends on distinguishing no-inventory / all-assigned /
    /// no-filter-match.
    pub async fn allocate_by_filter(
        pool: &PgPool,
        kind: PoolKind,
        agent_id: &str,
        filter: &AllocationFilter,
    ) -> Result<AllocationOutcome, sqlx::Error> {
        let count = filter.count.unwrap_or(10).clamp(1, MAX_ALLOCATION);

        let ids: Vec<DbId> = match kind {
            PoolKind::Client => {
                sqlx::query_scalar(&format!(
                    "SELECT id FROM clients \
                     WHERE {UNASSIGNED} \
                       AND ($1::text IS NULL OR customer_type = $1) \
                       AND ($2::text IS NULL OR airplane = $2) \
                     ORDER BY id \
                     LIMIT $3"
                ))
                .bind(filter.customer_type.as_deref())
                .bind(filter.airplane.as_deref())
                .bind(count)
                .fetch_all(pool)
                .await?
            }
            PoolKind::Customer => {
                sqlx::query_scalar(&format!(
                    "SELECT id FROM customers \
                     WHERE {UNASSIGNED} \
                       AND ($1::text IS NULL OR customer_type = $1) \
                     ORDER BY id \
                     LIMIT $2"
                ))
                .bind(filter.customer_type.as_deref())
                .bind(count)
                .fetch_all(pool)
                .await?
            }
        };

        if ids.is_empty() {
            let filtered = filter.customer_type.is_some()
                || (kind == PoolKind::Client && filter.airplane.is_some());
            let diagnostic = Self::diagnose(pool, kind, filtered).await?;
            tracing::info!(
                pool = %kind,
                agent_id,
                total = diagnostic.total_pool,
                already_assigned = diagnostic.already_assigned,
                "Allocation matched zero records"
            );
            return Ok(AllocationOutcome {
                assignments: Vec::new(),
                diagnostic: Some(diagnostic),
            });
        }

        let assignments = Self::assign_ids(pool, kind, agent_id, &ids).await?;
        Ok(AllocationOutcome {
            assignments,
            diagnostic: None,
        })
    }

    /// Allocate exactly the named pool records to `agent_id`.
    ///
    /// Ids that are already assigned (or unknown) are silently dropped;
    /// the outcome reports however many of the requested ids were actually
    /// available. No diagnostic is produced on this path.
    pub async fn allocate_by_ids(
        pool: &PgPool,
        kind: PoolKind,
        agent_id: &str,
        ids: &[DbId],
    ) -> Result<AllocationOutcome, sqlx::Error> {
        let assignments = Self::assign_ids(pool, kind, agent_id, ids).await?;
        Ok(AllocationOutcome {
            assignments,
            diagnostic: None,
        })
    }

    /// Mark the given pool records assigned and snapshot each into a new
    /// assignment row, as one statement.
    ///
    /// The `WHERE` re-checks the unassigned predicate, so records named here
    /// that were assigned in the meantime are skipped, not stolen.
    async fn assign_ids(
        pool: &PgPool,
        kind: PoolKind,
        agent_id: &str,
        ids: &[DbId],
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = match kind {
            PoolKind::Client => format!(
                "WITH picked AS ( \
                     UPDATE clients \
                     SET status = 'assigned', assigned_to = $2, assigned_at = NOW() \
                     WHERE id = ANY($1) AND {UNASSIGNED} \
                     RETURNING id, phone_number, name, customer_type, airplane \
                 ) \
                 INSERT INTO assignments (client_id, kind, snapshot, agent_id) \
                 SELECT p.id, 'client', \
                        jsonb_build_object( \
                            'id', p.id, \
                            'phoneNumber', p.phone_number, \
                            'name', p.name, \
                            'customerType', p.customer_type, \
                            'airplane', p.airplane), \
                        $2 \
                 FROM picked p \
                 RETURNING {COLUMNS}"
            ),
            PoolKind::Customer => format!(
                "WITH picked AS ( \
                     UPDATE customers \
                     SET status = 'assigned', assigned_to = $2, assigned_at = NOW() \
                     WHERE id = ANY($1) AND {UNASSIGNED} \
                     RETURNING id, name, phone, email, customer_type, flight_info \
                 ) \
                 INSERT INTO assignments (customer_id, kind, snapshot, agent_id) \
                 SELECT p.id, 'customer', \
                        jsonb_build_object( \
                            'id', p.id, \
                            'name', p.name, \
                            'phone', p.phone, \
                            'email', p.email, \
                            'customerType', p.customer_type, \
                            'flightInfo', p.flight_info), \
                        $2 \
                 FROM picked p \
                 RETURNING {COLUMNS}"
            ),
        };

        let assignments: Vec<Assignment> = sqlx::query_as(&sql)
            .bind(ids)
            .bind(agent_id)
            .fetch_all(pool)
            .await?;

        tracing::info!(
            pool = %kind,
            agent_id,
            requested = ids.len(),
            assigned = assignments.len(),
            "Allocated pool records"
        );
        Ok(assignments)
    }

    /// Build the zero-match diagnostic for one pool.
    async fn diagnose(
        pool: &PgPool,
        kind: PoolKind,
        filtered: bool,
    ) -> Result<AllocationDiagnostic, sqlx::Error> {
        let table = table_for(kind);
        let (total, available): (i64, i64) = sqlx::query_as(&format!(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE {UNASSIGNED}) FROM {table}"
        ))
        .fetch_one(pool)
        .await?;

        Ok(AllocationDiagnostic {
            total_pool: total,
            already_assigned: total - available,
            available,
            suggestion: suggestion(total, available, filtered).to_string(),
        })
    }

    // ── Call-outcome transition ─────────────────────────────────────────

    /// Mark an assignment called: flag it, archive its snapshot, and delete
    /// the originating pool record -- one transaction.
    ///
    /// Returns `Ok(None)` when no assignment with `called = false` exists
    /// under that id, which also covers the repeat call on an id that was
    /// already flagged or archived.
    ///
    /// The pool delete goes by id first; when the id no longer resolves
    /// (drifted record, ambiguous pool relationship), it falls back to
    /// matching phone number scoped to the assignee, in the assignment's own
    /// pool and then the other one. The fallback is deliberate, documented
    /// behavior.
    pub async fn mark_called(
        pool: &PgPool,
        assignment_id: DbId,
        outcome: Option<&str>,
    ) -> Result<Option<MarkCalledOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<Assignment> = sqlx::query_as(&format!(
            "UPDATE assignments \
             SET called = TRUE, called_at = NOW(), outcome = $2, status = 'completed' \
             WHERE id = $1 AND called = FALSE \
             RETURNING {COLUMNS}"
        ))
        .bind(assignment_id)
        .bind(outcome)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(assignment) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        let phone = snapshot_phone(&assignment);
        sqlx::query(
            "INSERT INTO archive \
             (entity_type, source_id, phone_number, agent_id, payload, outcome, called_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW())",
        )
        .bind(&assignment.kind)
        .bind(assignment.client_id.or(assignment.customer_id))
        .bind(phone.as_deref())
        .bind(&assignment.agent_id)
        .bind(&assignment.snapshot)
        .bind(assignment.outcome.as_deref())
        .execute(&mut *tx)
        .await?;

        let kind = PoolKind::parse(&assignment.kind).unwrap_or(PoolKind::Client);
        let source_id = assignment.client_id.or(assignment.customer_id);

        let mut deleted = false;
        if let Some(id) = source_id {
            let table = table_for(kind);
            let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await?;
            deleted = result.rows_affected() > 0;
        }
        if !deleted {
            if let Some(ref phone) = phone {
                for candidate in [kind, other_pool(kind)] {
                    let table = table_for(candidate);
                    let phone_col = phone_column_for(candidate);
                    let result = sqlx::query(&format!(
                        "DELETE FROM {table} WHERE {phone_col} = $1 AND assigned_to = $2"
                    ))
                    .bind(phone)
                    .bind(&assignment.agent_id)
                    .execute(&mut *tx)
                    .await?;
                    if result.rows_affected() > 0 {
                        deleted = true;
                        break;
                    }
                }
            }
        }

        tx.commit().await?;

        tracing::info!(
            assignment_id,
            outcome = outcome.unwrap_or(""),
            pool_record_deleted = deleted,
            "Assignment marked called"
        );
        Ok(Some(MarkCalledOutcome {
            assignment,
            pool_record_deleted: deleted,
        }))
    }

    // ── Batch maintenance ───────────────────────────────────────────────

    /// Return all uncompleted assignments to their pools.
    ///
    /// For each assignment with `called = FALSE` (optionally scoped to one
    /// agent and/or pool), a minimal pool record is upserted by phone number
    /// and the assignment row is deleted. Forward-only: the reconstruction
    /// carries phone, name and the recycle timestamp, not the original full
    /// record.
    pub async fn recycle(
        pool: &PgPool,
        agent_id: Option<&str>,
        kind: Option<PoolKind>,
    ) -> Result<u64, sqlx::Error> {
        let rows: Vec<Assignment> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM assignments \
             WHERE called = FALSE \
               AND ($1::text IS NULL OR agent_id = $1) \
               AND ($2::text IS NULL OR kind = $2) \
             ORDER BY id"
        ))
        .bind(agent_id)
        .bind(kind.map(PoolKind::as_str))
        .fetch_all(pool)
        .await?;

        let mut recycled = 0u64;
        for assignment in &rows {
            let target = PoolKind::parse(&assignment.kind).unwrap_or(PoolKind::Client);
            if let Some(phone) = snapshot_phone(assignment) {
                let name = snapshot_name(assignment);
                Self::repool(pool, target, &phone, name.as_deref()).await?;
            }
            sqlx::query("DELETE FROM assignments WHERE id = $1")
                .bind(assignment.id)
                .execute(pool)
                .await?;
            recycled += 1;
        }

        tracing::info!(
            recycled,
            agent_id = agent_id.unwrap_or("<all>"),
            "Recycled uncompleted assignments"
        );
        Ok(recycled)
    }

    /// Upsert a minimal available pool record keyed by phone number.
    ///
    /// Phone number is not unique in either pool table, so the upsert is an
    /// update-then-insert rather than `ON CONFLICT`.
    async fn repool(
        pool: &PgPool,
        kind: PoolKind,
        phone: &str,
        name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let table = table_for(kind);
        let phone_col = phone_column_for(kind);

        let result = sqlx::query(&format!(
            "UPDATE {table} \
             SET status = 'available', assigned_to = NULL, assigned_at = NULL, \
                 recycled_at = NOW(), name = COALESCE($2, name) \
             WHERE {phone_col} = $1"
        ))
        .bind(phone)
        .bind(name)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            sqlx::query(&format!(
                "INSERT INTO {table} ({phone_col}, name, status, recycled_at) \
                 VALUES ($1, $2, 'available', NOW())"
            ))
            .bind(phone)
            .bind(name)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Move all completed assignments into the archive.
    ///
    /// Each assignment with `called = TRUE` is copied into `archive` tagged
    /// with its pool kind, then deleted. Re-running when nothing is completed
    /// is a no-op; duplicate archive rows for the same natural key are an
    /// accepted property, never deduped.
    pub async fn archive_completed(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let rows: Vec<Assignment> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM assignments WHERE called = TRUE ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        let mut archived = 0u64;
        for assignment in &rows {
            sqlx::query(
                "INSERT INTO archive \
                 (entity_type, source_id, phone_number, agent_id, payload, outcome, called_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(&assignment.kind)
            .bind(assignment.client_id.or(assignment.customer_id))
            .bind(snapshot_phone(assignment))
            .bind(&assignment.agent_id)
            .bind(&assignment.snapshot)
            .bind(assignment.outcome.as_deref())
            .bind(assignment.called_at)
            .execute(pool)
            .await?;

            sqlx::query("DELETE FROM assignments WHERE id = $1")
                .bind(assignment.id)
                .execute(pool)
                .await?;
            archived += 1;
        }

        tracing::info!(archived, "Archived completed assignments");
        Ok(archived)
    }
}

/// Pool table name for a kind.
fn table_for(kind: PoolKind) -> &'static str {
    match kind {
        PoolKind::Client => "clients",
        PoolKind::Customer => "customers",
    }
}

/// Phone-number column name for a pool.
fn phone_column_for(kind: PoolKind) -> &'static str {
    match kind {
        PoolKind::Client => "phone_number",
        PoolKind::Customer => "phone",
    }
}

fn other_pool(kind: PoolKind) -> PoolKind {
    match kind {
        PoolKind::Client => PoolKind::Customer,
        PoolKind::Customer => PoolKind::Client,
    }
}

/// Phone number out of an assignment snapshot (`phoneNumber` for clients,
/// `phone` for customers).
fn snapshot_phone(assignment: &Assignment) -> Option<String> {
    let key = if assignment.kind == "customer" {
        "phone"
    } else {
        "phoneNumber"
    };
    assignment
        .snapshot
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

/// Display name out of an assignment snapshot.
fn snapshot_name(assignment: &Assignment) -> Option<String> {
    assignment
        .snapshot
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

/// Suggestion string for the zero-match diagnostic.
fn suggestion(total: i64, available: i64, filtered: bool) -> &'static str {
    if total == 0 {
        "The pool is empty; import records before assigning"
    } else if available == 0 {
        "All records are already assigned; recycle uncompleted calls or import more records"
    } else if filtered {
        "No unassigned records match the requested filters; try relaxing them"
    } else {
        "Unassigned records exist but could not be selected; retry the assignment"
    }
}
