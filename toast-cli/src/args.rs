use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toast - database maintenance for the toast backend
#[derive(Parser, Debug)]
#[command(name = "toast")]
#[command(version)]
#[command(about = "Maintain the toast backend database (migrations, seeding, sync)", long_about = None)]
pub struct Cli {
    /// Local database name used by the provider CLI
    #[arg(long = "database", default_value = "toast-app-db", global = true)]
    pub database: String,

    /// Provider CLI used for local operations (program plus leading args)
    #[arg(long = "wrangler-bin", default_value = "npx wrangler", global = true)]
    pub wrangler_bin: String,

    /// Directory containing the generated migration files
    #[arg(long = "migrations-dir", default_value = "migrations", global = true)]
    pub migrations_dir: PathBuf,

    /// Skip TLS certificate verification for the remote endpoint
    /// (corporate-proxy workaround; never needed in production)
    #[arg(long = "insecure", global = true)]
    pub insecure: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify the remote database is reachable and list its tables
    TestConnection,

    /// Apply pending migration files to the remote database
    ApplyMigrations,

    /// Seed the remote database with the sample dataset
    SeedRemote,

    /// Seed the local replica with the sample dataset
    SeedLocal,

    /// Delete ALL rows from the remote database
    Clear {
        /// Required acknowledgement for the destructive run
        #[arg(long = "confirm")]
        confirm: bool,
    },

    /// Mirror remote data into the local replica (local-only rows are lost)
    SyncToLocal,

    /// Wipe, migrate, and seed the local replica from remote data
    SetupLocal,
}
