//! SQL execution against the local replica via the provider CLI.
//!
//! The local development database is owned by `wrangler`; there is no
//! in-process driver for it. Every statement becomes one subprocess
//! invocation (`wrangler d1 execute <db> --local --json --command <sql>`),
//! and the CLI's JSON output decodes into the same result-set shape the
//! remote endpoint uses.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use serde_json::Value as JsonValue;
use tokio::process::Command;

use crate::database::Database;
use crate::error::{LinkError, Result};
use crate::models::{ResultSet, Row, SqlStatement};

/// Default local database name.
pub const DEFAULT_DATABASE: &str = "toast-app-db";
/// Default provider CLI invocation (program plus leading arguments).
pub const DEFAULT_WRANGLER: &str = "npx wrangler";
/// Where the provider CLI keeps the local replica's state.
pub const DEFAULT_STATE_DIR: &str = ".wrangler/state/v3/d1/miniflare-D1DatabaseObject";

/// Executes statements against the local replica through the provider CLI.
#[derive(Debug, Clone)]
pub struct LocalDatabase {
    database: String,
    wrangler: String,
    state_dir: PathBuf,
}

impl LocalDatabase {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            wrangler: DEFAULT_WRANGLER.to_string(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }

    /// Override the CLI invocation, e.g. `"wrangler"` for a global install.
    pub fn with_wrangler(mut self, wrangler: impl Into<String>) -> Self {
        self.wrangler = wrangler.into();
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Remove the local replica's state directory.
    ///
    /// A missing directory is not an error; callers treat other failures as
    /// warnings (the CLI recreates state on the next invocation).
    pub fn wipe_state(&self) -> std::io::Result<()> {
        match std::fs::remove_dir_all(&self.state_dir) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// Apply pending migration files with `wrangler d1 migrations apply`.
    pub async fn apply_migrations(&self) -> Result<()> {
        self.run(&["d1", "migrations", "apply", &self.database, "--local"])
            .await
            .map(|_| ())
    }

    /// Execute a single statement, decoding the CLI's JSON output.
    pub async fn execute(&self, statement: &SqlStatement) -> Result<Vec<Row>> {
        let sql = render_statement(statement);
        let stdout = self
            .run(&[
                "d1", "execute", &self.database, "--local", "--json", "--command", &sql,
            ])
            .await?;

        // The CLI prints one result set per statement, same shape as the
        // remote envelope's `result` array.
        let sets: Vec<ResultSet> = serde_json::from_str(stdout.trim())?;
        Ok(sets.into_iter().next().map(|s| s.results).unwrap_or_default())
    }

    async fn run(&self, extra: &[&str]) -> Result<String> {
        let mut parts = self.wrangler.split_whitespace();
        let program = parts.next().unwrap_or("wrangler").to_string();
        let mut args: Vec<String> = parts.map(String::from).collect();
        args.extend(extra.iter().map(|s| s.to_string()));

        let display = format!("{} {}", program, args.join(" "));
        debug!("[D1_LOCAL] {}", display);

        let output = Command::new(&program)
            .args(&args)
            .output()
            .await
            .map_err(|e| LinkError::Subprocess {
                command: display.clone(),
                status: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(LinkError::Subprocess {
                command: display,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Database for LocalDatabase {
    async fn query(&self, statement: &SqlStatement) -> Result<Vec<Row>> {
        self.execute(statement).await
    }
}

/// Render a parameterized statement as a flat SQL string.
///
/// The provider CLI takes no bind parameters, so each `?` placeholder
/// outside a string literal is replaced with the next parameter rendered as
/// an escaped SQL literal. Surplus placeholders are left in place; the
/// replica reports the mismatch.
fn render_statement(statement: &SqlStatement) -> String {
    let mut params = statement.params.iter();
    let mut out = String::with_capacity(statement.sql.len());
    let mut in_string = false;

    for ch in statement.sql.chars() {
        match ch {
            '\'' => {
                in_string = !in_string;
                out.push(ch);
            }
            '?' if !in_string => match params.next() {
                Some(value) => out.push_str(&sql_literal(value)),
                None => out.push('?'),
            },
            _ => out.push(ch),
        }
    }
    out
}

/// Render one JSON scalar as a SQL literal.
fn sql_literal(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::Bool(true) => "1".to_string(),
        JsonValue::Bool(false) => "0".to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => format!("'{}'", s.replace('\'', "''")),
        // Parameters are scalars; anything else is quoted as its JSON text.
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_plain_statement_unchanged() {
        let statement = SqlStatement::new("DELETE FROM toasts");
        assert_eq!(render_statement(&statement), "DELETE FROM toasts");
    }

    #[test]
    fn test_render_substitutes_in_order() {
        let statement = SqlStatement::with_params(
            "INSERT INTO users (userID, name) VALUES (?, ?)",
            vec![json!("u1"), json!("Alice")],
        );
        assert_eq!(
            render_statement(&statement),
            "INSERT INTO users (userID, name) VALUES ('u1', 'Alice')"
        );
    }

    #[test]
    fn test_render_escapes_single_quotes() {
        let statement = SqlStatement::with_params(
            "INSERT INTO users (userID, name) VALUES (?, ?)",
            vec![json!("u1"), json!("O'Brien")],
        );
        assert_eq!(
            render_statement(&statement),
            "INSERT INTO users (userID, name) VALUES ('u1', 'O''Brien')"
        );
    }

    #[test]
    fn test_render_ignores_placeholder_inside_string_literal() {
        let statement = SqlStatement::with_params(
            "SELECT * FROM users WHERE name = 'who?' AND userID = ?",
            vec![json!("u1")],
        );
        assert_eq!(
            render_statement(&statement),
            "SELECT * FROM users WHERE name = 'who?' AND userID = 'u1'"
        );
    }

    #[test]
    fn test_render_leaves_surplus_placeholders() {
        let statement =
            SqlStatement::with_params("SELECT ? , ? FROM users", vec![json!(1)]);
        assert_eq!(render_statement(&statement), "SELECT 1 , ? FROM users");
    }

    #[test]
    fn test_sql_literal_scalars() {
        assert_eq!(sql_literal(&json!(null)), "NULL");
        assert_eq!(sql_literal(&json!(true)), "1");
        assert_eq!(sql_literal(&json!(false)), "0");
        assert_eq!(sql_literal(&json!(42)), "42");
        assert_eq!(sql_literal(&json!(1.5)), "1.5");
        assert_eq!(sql_literal(&json!("plain")), "'plain'");
    }

    #[test]
    fn test_wipe_state_missing_dir_is_ok() {
        let scratch = tempfile::tempdir().unwrap();
        let db = LocalDatabase::new("toast-app-db")
            .with_state_dir(scratch.path().join("does-not-exist"));
        assert!(db.wipe_state().is_ok());
    }

    #[test]
    fn test_wipe_state_removes_dir() {
        let scratch = tempfile::tempdir().unwrap();
        let state = scratch.path().join("state");
        std::fs::create_dir_all(state.join("nested")).unwrap();
        let db = LocalDatabase::new("toast-app-db").with_state_dir(&state);
        db.wipe_state().unwrap();
        assert!(!state.exists());
    }
}
