//! Mirror remote data into the local replica.
//!
//! Destructive-then-additive: local rows are deleted first, so anything not
//! present remotely is lost. Fetch failures are fatal; per-row insert
//! failures are warnings and the run continues.

use colored::Colorize;
use toast_link::{store, Database, LocalDatabase, RemoteDatabase, Toast, User};

use crate::commands::short_id;
use crate::error::Result;
use crate::report::BatchReport;

/// What a sync run fetched and wrote.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub fetched_users: usize,
    pub fetched_toasts: usize,
    pub users: BatchReport,
    pub toasts: BatchReport,
}

/// Read the full contents of both remote tables. Fatal on failure; local
/// data must not be cleared if it cannot be replaced.
pub async fn fetch_remote<R: Database + ?Sized>(remote: &R) -> Result<(Vec<User>, Vec<Toast>)> {
    let users = store::list_users(remote).await?;
    println!("   Found {} users in remote database", users.len());

    let toasts = store::list_toasts(remote).await?;
    println!("   Found {} toasts in remote database", toasts.len());

    Ok((users, toasts))
}

/// Insert fetched rows into the target, users before toasts, best-effort
/// per row. Timestamps are carried over unchanged.
pub async fn copy_rows<L: Database + ?Sized>(
    local: &L,
    users: &[User],
    toasts: &[Toast],
) -> SyncReport {
    let mut report = SyncReport {
        fetched_users: users.len(),
        fetched_toasts: toasts.len(),
        ..SyncReport::default()
    };

    println!();
    println!("{}", "Syncing users...".bold());
    for user in users {
        match store::insert_user(local, user).await {
            Ok(()) => {
                println!("   {} Synced user: {}", "✓".green(), user.name);
                report.users.push_ok(user.name.clone());
            }
            Err(e) => {
                println!("   {} Failed to sync user: {}: {}", "⚠".yellow(), user.name, e);
                report.users.push_failed(user.name.clone(), e);
            }
        }
    }

    println!();
    println!("{}", "Syncing toasts...".bold());
    for toast in toasts {
        let label = short_id(&toast.toast_id);
        match store::insert_toast_with_time(local, toast).await {
            Ok(()) => {
                println!("   {} Synced toast: {}", "✓".green(), label);
                report.toasts.push_ok(label);
            }
            Err(e) => {
                println!("   {} Failed to sync toast: {}: {}", "⚠".yellow(), label, e);
                report.toasts.push_failed(label, e);
            }
        }
    }

    report
}

/// Fetch remote rows, clear the local tables, and re-insert.
pub async fn sync_to_local<R: Database + ?Sized, L: Database + ?Sized>(
    remote: &R,
    local: &L,
) -> Result<SyncReport> {
    println!("{}", "Fetching remote data...".bold());
    let (users, toasts) = fetch_remote(remote).await?;

    println!();
    println!("{}", "Clearing local database...".bold());
    // Toasts first (foreign key constraints); failure here usually just
    // means the table is missing or already empty.
    let cleared = async {
        store::delete_all_toasts(local).await?;
        store::delete_all_users(local).await
    }
    .await;
    match cleared {
        Ok(()) => println!("   {} Local database cleared", "✓".green()),
        Err(e) => println!(
            "   {} Could not clear local database (might be empty): {}",
            "⚠".yellow(),
            e
        ),
    }

    Ok(copy_rows(local, &users, &toasts).await)
}

/// `sync-to-local`: mirror the remote database into the local replica.
pub async fn run(remote: &RemoteDatabase, local: &LocalDatabase) -> Result<()> {
    println!("{}", "Syncing remote data to local database...".bold());
    println!();

    let report = sync_to_local(remote, local).await?;

    println!();
    println!(
        "{} Sync completed ({} users, {} toasts, {} warnings)",
        "✓".green().bold(),
        report.users.succeeded(),
        report.toasts.succeeded(),
        report.users.failed() + report.toasts.failed()
    );
    println!("{}", "Your local database now matches the remote database".dimmed());
    Ok(())
}
