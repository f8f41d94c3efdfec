use colored::Colorize;
use toast_link::{LocalDatabase, RemoteCredentials, RemoteDatabase};

use crate::args::Cli;
use toast_cli::Result;

/// Build the remote executor from the environment.
///
/// Credentials are validated (including placeholder detection) before any
/// network call; a missing variable exits the command with a config error.
pub fn remote_database(cli: &Cli) -> Result<RemoteDatabase> {
    let credentials = RemoteCredentials::from_env()?;

    println!("{} Environment variables loaded:", "✓".green());
    println!("   Account ID: {}", credentials.account_id);
    println!("   Database ID: {}", credentials.database_id);
    println!("   API Token: {}", credentials.token_preview());
    println!();

    Ok(RemoteDatabase::builder(credentials)
        .danger_accept_invalid_certs(cli.insecure)
        .build()?)
}

/// Build the local executor from the CLI flags.
pub fn local_database(cli: &Cli) -> LocalDatabase {
    LocalDatabase::new(&cli.database).with_wrangler(&cli.wrangler_bin)
}
