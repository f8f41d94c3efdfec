//! Seed the sample dataset into a database (remote endpoint or local
//! replica).
//!
//! Inserts are ignore-on-conflict and every row failure is recorded and
//! printed individually; one bad row never stops the batch.

use std::collections::HashMap;

use colored::Colorize;
use toast_link::{store, Database, LocalDatabase, RemoteDatabase};

use crate::commands::short_id;
use crate::error::Result;
use crate::report::BatchReport;
use crate::sample_data::{sample_toasts, sample_users};

/// Insert the sample users then the sample toasts, best-effort per row.
///
/// Users go first so the toast foreign keys resolve.
pub async fn seed_database<D: Database + ?Sized>(db: &D) -> BatchReport {
    let mut report = BatchReport::new();

    println!("{}", "Seeding users...".bold());
    for user in sample_users() {
        match store::insert_user_ignore(db, &user).await {
            Ok(()) => {
                println!("   {} Added user: {}", "✓".green(), user.name);
                report.push_ok(user.name.clone());
            }
            Err(e) => {
                println!(
                    "   {} User {} might already exist or error occurred: {}",
                    "⚠".yellow(),
                    user.name,
                    e
                );
                report.push_failed(user.name.clone(), e);
            }
        }
    }

    println!();
    println!("{}", "Seeding toasts...".bold());
    for toast in sample_toasts() {
        let label = short_id(&toast.toast_id);
        match store::insert_toast_ignore(db, &toast).await {
            Ok(()) => {
                println!("   {} Added toast: {}", "✓".green(), label);
                report.push_ok(label);
            }
            Err(e) => {
                println!(
                    "   {} Toast {} might already exist or error occurred: {}",
                    "⚠".yellow(),
                    label,
                    e
                );
                report.push_failed(label, e);
            }
        }
    }

    report
}

/// Print row counts and a few sample rows.
async fn print_verification<D: Database + ?Sized>(db: &D) -> Result<()> {
    println!("   Total users: {}", store::count_users(db).await?);
    println!("   Total toasts: {}", store::count_toasts(db).await?);

    let users = store::list_users(db).await?;
    let names: HashMap<&str, &str> = users
        .iter()
        .map(|u| (u.user_id.as_str(), u.name.as_str()))
        .collect();

    println!();
    println!("{}", "Sample toasts:".bold());
    for toast in store::list_toasts(db).await?.iter().take(3) {
        let toaster = names.get(toast.toaster_id.as_str()).unwrap_or(&"?");
        let toastie = names.get(toast.toastie_id.as_str()).unwrap_or(&"?");
        println!(
            "   - {} toasted {} at {}",
            toaster, toastie, toast.toast_time
        );
    }
    Ok(())
}

/// `seed-remote`: seed the remote database and verify the result.
pub async fn run_remote(db: &RemoteDatabase) -> Result<()> {
    println!("{}", "Seeding remote database...".bold());
    println!();

    let report = seed_database(db).await;

    println!();
    println!("{}", "Verification:".bold());
    print_verification(db).await?;

    println!();
    println!(
        "{} Database seeding completed ({} rows, {} warnings)",
        "✓".green().bold(),
        report.succeeded(),
        report.failed()
    );
    Ok(())
}

/// `seed-local`: seed the local replica through the provider CLI.
pub async fn run_local(db: &LocalDatabase) -> Result<()> {
    println!("{}", "Seeding local database...".bold());
    println!();

    let report = seed_database(db).await;

    println!();
    match store::count_users(db).await {
        Ok(count) => println!("   {} Local database seeded ({} users)", "✓".green(), count),
        Err(e) => println!("   {} Could not verify seeding: {}", "⚠".yellow(), e),
    }

    println!();
    println!(
        "{} Local database seeding completed ({} rows, {} warnings)",
        "✓".green().bold(),
        report.succeeded(),
        report.failed()
    );
    println!("{}", "You can now run the dev server with local data".dimmed());
    Ok(())
}
