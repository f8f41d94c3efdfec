//! Verify the remote database is reachable with the configured credentials.

use colored::Colorize;
use toast_link::{store, RemoteDatabase};

use crate::error::Result;

/// `test-connection`: list tables and report row counts.
pub async fn run(db: &RemoteDatabase) -> Result<()> {
    println!("{}", "Testing remote database connection...".bold());
    println!();

    println!("Fetching database tables...");
    let tables = store::list_tables(db).await?;

    println!();
    println!("{} Connected successfully!", "✓".green().bold());
    println!();
    println!("{}", "Tables in your database:".bold());
    if tables.is_empty() {
        println!("   (No tables found - database might be empty)");
    } else {
        for table in &tables {
            println!("   - {}", table);
        }
    }

    if tables.iter().any(|t| t == "users") {
        println!();
        println!("{}", "Checking users table...".bold());
        println!("   Total users: {}", store::count_users(db).await?);
    }

    if tables.iter().any(|t| t == "toasts") {
        println!();
        println!("{}", "Checking toasts table...".bold());
        println!("   Total toasts: {}", store::count_toasts(db).await?);
    }

    println!();
    println!("{} Connection test completed", "✓".green().bold());
    Ok(())
}
