//! Apply migration files to the remote database.
//!
//! Reads every `.sql` file in the migrations directory in name order (the
//! schema tool numbers them) and applies each through the library's
//! migration applier. An "already exists" statement is a skip; any other
//! statement failure aborts the run.

use std::path::Path;

use colored::Colorize;
use toast_link::migrate::{apply_migration, StatementOutcome};
use toast_link::{store, RemoteDatabase};

use crate::error::{CliError, Result};

/// Load `(file name, contents)` for every migration file, sorted by name.
pub fn read_migration_scripts(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut scripts = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| {
        CliError::File(format!("cannot read migrations dir {}: {}", dir.display(), e))
    })?;

    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                CliError::File(format!("failed to read {}: {}", path.display(), e))
            })?;
            scripts.push((name, contents));
        }
    }

    scripts.sort_by(|a, b| a.0.cmp(&b.0));

    if scripts.is_empty() {
        return Err(CliError::File(format!(
            "no migration files found in {}",
            dir.display()
        )));
    }
    Ok(scripts)
}

/// `apply-migrations`: run every migration file against the remote database.
pub async fn run(db: &RemoteDatabase, migrations_dir: &Path) -> Result<()> {
    println!("{}", "Applying migrations to remote database...".bold());
    println!();

    let scripts = read_migration_scripts(migrations_dir)?;
    println!("   Found {} migration file(s)", scripts.len());

    for (name, script) in &scripts {
        println!();
        println!("   Applying {}...", name);
        let outcomes = apply_migration(db, script).await?;
        let skipped = outcomes
            .iter()
            .filter(|o| **o == StatementOutcome::Skipped)
            .count();
        if skipped > 0 {
            println!(
                "   {} {}: {} statements applied, {} already existed",
                "⚠".yellow(),
                name,
                outcomes.len() - skipped,
                skipped
            );
        } else {
            println!(
                "   {} {}: {} statements applied",
                "✓".green(),
                name,
                outcomes.len()
            );
        }
    }

    println!();
    println!("{}", "Verifying tables...".bold());
    let tables = store::list_tables(db).await?;
    if tables.is_empty() {
        println!("   No user tables found");
    } else {
        for table in &tables {
            println!("   {} {}", "✓".green(), table);
        }
    }

    println!();
    println!("{} Migration complete", "✓".green().bold());
    Ok(())
}
