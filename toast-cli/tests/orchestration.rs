//! Orchestrator behavior against the in-memory database.
//!
//! These tests pin the batch semantics the maintenance commands rely on:
//! idempotent seeding, best-effort per-row error collection, migration
//! re-runs, and destructive-then-additive sync.

use toast_cli::commands::{clear, seed, sync};
use toast_link::memory::{MemoryDatabase, FIXED_TIME};
use toast_link::migrate::{apply_migration, split_statements, StatementOutcome};
use toast_link::{store, Toast, User};

fn repo_migration() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../migrations/0000_init.sql");
    std::fs::read_to_string(path).expect("repo migration file should exist")
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = MemoryDatabase::with_schema();

    let first = seed::seed_database(&db).await;
    assert!(first.is_clean());
    assert_eq!(store::count_users(&db).await.unwrap(), 4);
    assert_eq!(store::count_toasts(&db).await.unwrap(), 4);

    // Re-running inserts the same primary keys with INSERT OR IGNORE.
    let second = seed::seed_database(&db).await;
    assert!(second.is_clean());
    assert_eq!(store::count_users(&db).await.unwrap(), 4);
    assert_eq!(store::count_toasts(&db).await.unwrap(), 4);
}

#[tokio::test]
async fn test_seed_clear_seed_matches_single_seed() {
    let db = MemoryDatabase::with_schema();

    seed::seed_database(&db).await;
    clear::clear_database(&db).await;
    seed::seed_database(&db).await;

    assert_eq!(store::count_users(&db).await.unwrap(), 4);
    assert_eq!(store::count_toasts(&db).await.unwrap(), 4);
}

#[tokio::test]
async fn test_seed_records_exactly_which_rows_failed() {
    let db = MemoryDatabase::with_schema();
    db.fail_when("Bob Smith");

    let report = seed::seed_database(&db).await;

    assert_eq!(report.failed(), 1);
    assert_eq!(report.failed_labels(), vec!["Bob Smith"]);
    // The failure did not stop the rest of the batch.
    assert_eq!(store::count_users(&db).await.unwrap(), 3);
    assert_eq!(store::count_toasts(&db).await.unwrap(), 4);
}

#[tokio::test]
async fn test_clear_reports_empty_tables() {
    let db = MemoryDatabase::with_schema();
    seed::seed_database(&db).await;

    let report = clear::clear_database(&db).await;

    assert!(report.toasts_cleared);
    assert!(report.users_cleared);
    assert_eq!(report.toasts_remaining, Some(0));
    assert_eq!(report.users_remaining, Some(0));
}

#[tokio::test]
async fn test_clear_tolerates_missing_tables() {
    // No schema at all: every count and delete fails, none of it is fatal.
    let db = MemoryDatabase::new();
    let report = clear::clear_database(&db).await;

    assert!(!report.toasts_cleared);
    assert!(!report.users_cleared);
    assert_eq!(report.toasts_remaining, None);
    assert_eq!(report.users_remaining, None);
}

#[test]
fn test_clear_requires_confirmation() {
    assert!(clear::check_confirmation(false).is_err());
    assert!(clear::check_confirmation(true).is_ok());
}

#[tokio::test]
async fn test_repo_migration_applies_then_skips_on_rerun() {
    let db = MemoryDatabase::new();
    let script = repo_migration();
    assert_eq!(split_statements(&script).len(), 2);

    let first = apply_migration(&db, &script).await.unwrap();
    assert_eq!(
        first,
        vec![StatementOutcome::Applied, StatementOutcome::Applied]
    );
    assert_eq!(
        store::list_tables(&db).await.unwrap(),
        vec!["toasts", "users"]
    );

    // Second run: both tables exist, both statements downgrade to skips.
    let second = apply_migration(&db, &script).await.unwrap();
    assert_eq!(
        second,
        vec![StatementOutcome::Skipped, StatementOutcome::Skipped]
    );
}

#[tokio::test]
async fn test_migration_aborts_on_unrecoverable_failure() {
    let db = MemoryDatabase::new();
    db.fail_with("CREATE TABLE `toasts`", "near \"TABLE\": syntax error");

    let err = apply_migration(&db, &repo_migration()).await.unwrap_err();
    assert!(err.to_string().contains("syntax error"));

    // The first statement ran before the abort; nothing was rolled back.
    assert_eq!(store::list_tables(&db).await.unwrap(), vec!["users"]);
}

#[tokio::test]
async fn test_sync_makes_local_set_equal_to_remote() {
    let remote = MemoryDatabase::with_schema();
    store::insert_user(&remote, &User::new("u1", "Alice")).await.unwrap();
    store::insert_user(&remote, &User::new("u2", "Bob")).await.unwrap();
    store::insert_toast(&remote, &Toast::new("t1", "u1", "u2")).await.unwrap();

    // Prior local state that does not exist remotely.
    let local = MemoryDatabase::with_schema();
    store::insert_user(&local, &User::new("u9", "Zoe")).await.unwrap();
    store::insert_toast(&local, &Toast::new("t9", "u9", "u9")).await.unwrap();

    let report = sync::sync_to_local(&remote, &local).await.unwrap();

    assert_eq!(report.fetched_users, 2);
    assert_eq!(report.fetched_toasts, 1);
    assert!(report.users.is_clean());
    assert!(report.toasts.is_clean());

    // Local is now set-equal to remote; the local-only rows are gone.
    assert_eq!(local.users_snapshot(), remote.users_snapshot());
    assert_eq!(local.toasts_snapshot(), remote.toasts_snapshot());

    // Timestamps were carried over, not regenerated.
    let toasts = store::list_toasts(&local).await.unwrap();
    assert_eq!(toasts[0].toast_time, FIXED_TIME);
}

#[tokio::test]
async fn test_sync_fetch_failure_leaves_local_untouched() {
    let remote = MemoryDatabase::with_schema();
    remote.fail_when("SELECT userID, name FROM users");

    let local = MemoryDatabase::with_schema();
    store::insert_user(&local, &User::new("u9", "Zoe")).await.unwrap();

    assert!(sync::sync_to_local(&remote, &local).await.is_err());
    assert_eq!(store::count_users(&local).await.unwrap(), 1);
}

#[tokio::test]
async fn test_sync_row_failures_are_collected_not_fatal() {
    let remote = MemoryDatabase::with_schema();
    store::insert_user(&remote, &User::new("u1", "Alice")).await.unwrap();
    store::insert_user(&remote, &User::new("u2", "Bob")).await.unwrap();

    let local = MemoryDatabase::with_schema();
    local.fail_when("Bob");

    let report = sync::sync_to_local(&remote, &local).await.unwrap();

    assert_eq!(report.users.failed(), 1);
    assert_eq!(report.users.failed_labels(), vec!["Bob"]);
    assert_eq!(store::count_users(&local).await.unwrap(), 1);
}
