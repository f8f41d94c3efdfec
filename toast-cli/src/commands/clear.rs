//! Delete all rows from the remote database.
//!
//! Destructive against production, so the run is gated on a literal
//! `--confirm` flag checked before anything else: no credentials are read
//! and no query is issued without it.

use colored::Colorize;
use toast_link::{store, Database, RemoteDatabase};

use crate::error::{CliError, Result};

/// What the clear run observed and did.
#[derive(Debug, Default)]
pub struct ClearReport {
    pub toasts_cleared: bool,
    pub users_cleared: bool,
    pub toasts_remaining: Option<u64>,
    pub users_remaining: Option<u64>,
}

/// Refuse to run without the explicit confirmation flag.
pub fn check_confirmation(confirm: bool) -> Result<()> {
    println!(
        "{}",
        "WARNING: This will delete ALL data from the PRODUCTION database!"
            .yellow()
            .bold()
    );
    println!("{}", "This action cannot be undone!".yellow());
    println!();

    if !confirm {
        eprintln!("{} Safety check failed!", "✗".red().bold());
        eprintln!("To proceed, run: toast clear --confirm");
        return Err(CliError::Config(
            "confirmation required: pass --confirm".to_string(),
        ));
    }
    Ok(())
}

/// Delete toasts before users (foreign key order), best-effort throughout.
///
/// Count and delete failures are warnings, not errors: the table may simply
/// not exist yet.
pub async fn clear_database<D: Database + ?Sized>(db: &D) -> ClearReport {
    let mut report = ClearReport::default();

    println!("{}", "Current database state:".bold());
    match store::count_toasts(db).await {
        Ok(count) => println!("   Toasts: {}", count),
        Err(_) => println!("   {} Toasts table doesn't exist or is empty", "⚠".yellow()),
    }
    match store::count_users(db).await {
        Ok(count) => println!("   Users: {}", count),
        Err(_) => println!("   {} Users table doesn't exist or is empty", "⚠".yellow()),
    }

    println!();
    println!("{}", "Clearing data...".bold());
    match store::delete_all_toasts(db).await {
        Ok(()) => {
            println!("   {} Cleared toasts table", "✓".green());
            report.toasts_cleared = true;
        }
        Err(e) => println!(
            "   {} Could not clear toasts table (might not exist): {}",
            "⚠".yellow(),
            e
        ),
    }
    match store::delete_all_users(db).await {
        Ok(()) => {
            println!("   {} Cleared users table", "✓".green());
            report.users_cleared = true;
        }
        Err(e) => println!(
            "   {} Could not clear users table (might not exist): {}",
            "⚠".yellow(),
            e
        ),
    }

    println!();
    println!("{}", "Verification:".bold());
    match store::count_toasts(db).await {
        Ok(count) => {
            println!("   Toasts remaining: {}", count);
            report.toasts_remaining = Some(count);
        }
        Err(_) => println!("   {} Toasts table doesn't exist", "⚠".yellow()),
    }
    match store::count_users(db).await {
        Ok(count) => {
            println!("   Users remaining: {}", count);
            report.users_remaining = Some(count);
        }
        Err(_) => println!("   {} Users table doesn't exist", "⚠".yellow()),
    }

    report
}

/// `clear`: run the destructive clear against the remote database.
pub async fn run(db: &RemoteDatabase) -> Result<()> {
    println!("{}", "Clearing remote database...".bold());
    println!();

    clear_database(db).await;

    println!();
    println!(
        "{} Database clearing completed",
        "✓".green().bold()
    );
    Ok(())
}
