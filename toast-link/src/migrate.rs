//! Migration application against any [`Database`].
//!
//! Migration files are generated by the schema tool with one statement per
//! segment, separated by a literal marker line. Statements run strictly in
//! order; a statement whose failure says the object already exists is
//! success-equivalent (re-running a migration must not abort), any other
//! failure aborts the remaining sequence. There is no retry and no rollback
//! of already-applied statements.

use log::{debug, warn};

use crate::database::Database;
use crate::error::Result;
use crate::models::SqlStatement;

/// Literal marker separating statements within one migration file.
pub const STATEMENT_BREAKPOINT: &str = "--> statement-breakpoint";

/// How a single statement of a migration run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementOutcome {
    /// Executed successfully.
    Applied,
    /// Failed with "already exists"; treated as success-equivalent.
    Skipped,
}

/// Split a migration script into trimmed, non-empty statements in order.
///
/// Rejoining the result with [`STATEMENT_BREAKPOINT`] and splitting again
/// yields the same sequence.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(STATEMENT_BREAKPOINT)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Apply one migration script, statement by statement.
///
/// Returns the per-statement outcomes on success. Statement N+1 only starts
/// after statement N's outcome is known; later statements may depend on
/// earlier schema changes.
pub async fn apply_migration<D: Database + ?Sized>(
    db: &D,
    script: &str,
) -> Result<Vec<StatementOutcome>> {
    let statements = split_statements(script);
    let total = statements.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, statement) in statements.iter().enumerate() {
        debug!("[MIGRATE] executing statement {}/{}", index + 1, total);
        match db.query(&SqlStatement::new(statement.as_str())).await {
            Ok(_) => outcomes.push(StatementOutcome::Applied),
            Err(e) if e.is_already_exists() => {
                warn!(
                    "[MIGRATE] statement {}/{} skipped (already exists): {}",
                    index + 1,
                    total,
                    e
                );
                outcomes.push(StatementOutcome::Skipped);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_order_and_drops_empties() {
        let script = "\nCREATE TABLE a (x int);\n--> statement-breakpoint\n\n--> statement-breakpoint\nCREATE TABLE b (y int);\n";
        let statements = split_statements(script);
        assert_eq!(
            statements,
            vec!["CREATE TABLE a (x int);", "CREATE TABLE b (y int);"]
        );
    }

    #[test]
    fn test_split_round_trip() {
        let script = "CREATE TABLE a (x int);\n--> statement-breakpoint\nCREATE INDEX ix ON a (x);\n--> statement-breakpoint\nCREATE TABLE b (y int);";
        let first = split_statements(script);
        let rejoined = first.join(&format!("\n{}\n", STATEMENT_BREAKPOINT));
        assert_eq!(split_statements(&rejoined), first);
    }

    #[test]
    fn test_split_without_marker_is_single_statement() {
        let statements = split_statements("SELECT 1");
        assert_eq!(statements, vec!["SELECT 1"]);
    }

    #[test]
    fn test_split_empty_script_is_empty() {
        assert!(split_statements("   \n  ").is_empty());
    }
}
