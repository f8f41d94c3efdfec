//! toast - maintenance CLI for the toast backend database
//!
//! One subcommand per maintenance workflow:
//!
//! ```bash
//! # Check credentials and connectivity
//! toast test-connection
//!
//! # Create the schema on the remote database
//! toast apply-migrations
//!
//! # Populate the sample dataset (idempotent)
//! toast seed-remote
//!
//! # Mirror production data into the local replica
//! toast sync-to-local
//! ```
//!
//! Remote-targeting subcommands read `CLOUDFLARE_API_TOKEN`,
//! `CLOUDFLARE_ACCOUNT_ID`, and `CLOUDFLARE_DATABASE_ID` from the
//! environment and exit 1 before any network call if one is missing.

use clap::Parser;
use colored::Colorize;

use toast_cli::{commands, Result};

mod args;
mod connect;

use args::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::TestConnection => {
            let db = connect::remote_database(&cli)?;
            commands::test_connection::run(&db).await
        }

        Command::ApplyMigrations => {
            let db = connect::remote_database(&cli)?;
            commands::migrate::run(&db, &cli.migrations_dir).await
        }

        Command::SeedRemote => {
            let db = connect::remote_database(&cli)?;
            commands::seed::run_remote(&db).await
        }

        Command::SeedLocal => {
            let local = connect::local_database(&cli);
            commands::seed::run_local(&local).await
        }

        Command::Clear { confirm } => {
            // Confirmation is checked before credentials are even read; a
            // refused run has no side effects at all.
            commands::clear::check_confirmation(*confirm)?;
            let db = connect::remote_database(&cli)?;
            commands::clear::run(&db).await
        }

        Command::SyncToLocal => {
            let remote = connect::remote_database(&cli)?;
            let local = connect::local_database(&cli);
            commands::sync::run(&remote, &local).await
        }

        Command::SetupLocal => {
            let remote = connect::remote_database(&cli)?;
            let local = connect::local_database(&cli);
            commands::setup::run(&remote, &local).await
        }
    }
}
