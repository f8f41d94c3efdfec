//! Set up the local development database from scratch.
//!
//! Wipe local state, apply migrations through the provider CLI, then copy
//! remote data in. The wipe and migration steps are best-effort (the CLI
//! recreates state as needed); the remote fetch is fatal on failure.

use colored::Colorize;
use toast_link::{store, LocalDatabase, RemoteDatabase};

use crate::commands::sync::{copy_rows, fetch_remote};
use crate::error::Result;

/// `setup-local`: wipe, migrate, and seed the local replica from remote data.
pub async fn run(remote: &RemoteDatabase, local: &LocalDatabase) -> Result<()> {
    println!("{}", "Setting up local development database...".bold());
    println!();

    println!("{}", "Step 1: Cleaning up existing local database...".bold());
    match local.wipe_state() {
        Ok(()) => println!(
            "   {} Removed local state at {}",
            "✓".green(),
            local.state_dir().display()
        ),
        Err(e) => println!(
            "   {} Could not remove local state (might be expected): {}",
            "⚠".yellow(),
            e
        ),
    }

    println!();
    println!("{}", "Step 2: Applying database migrations...".bold());
    match local.apply_migrations().await {
        Ok(()) => println!("   {} Database schema applied", "✓".green()),
        Err(e) => println!(
            "   {} Migration apply failed (might be expected): {}",
            "⚠".yellow(),
            e
        ),
    }

    println!();
    println!("{}", "Step 3: Fetching data from remote database...".bold());
    let (users, toasts) = fetch_remote(remote).await?;

    println!();
    println!("{}", "Step 4: Seeding local database with remote data...".bold());
    let report = copy_rows(local, &users, &toasts).await;

    println!();
    println!("{}", "Step 5: Verifying local database setup...".bold());
    match store::count_users(local).await {
        Ok(count) => println!("   {} Local database has {} users", "✓".green(), count),
        Err(e) => println!(
            "   {} Could not verify database (but setup likely succeeded): {}",
            "⚠".yellow(),
            e
        ),
    }

    println!();
    println!(
        "{} Local database setup completed ({} rows, {} warnings)",
        "✓".green().bold(),
        report.users.succeeded() + report.toasts.succeeded(),
        report.users.failed() + report.toasts.failed()
    );
    println!(
        "{}",
        "Your local database now contains a copy of production data".dimmed()
    );
    println!(
        "{}",
        "Changes you make locally won't affect the remote database".dimmed()
    );
    Ok(())
}
