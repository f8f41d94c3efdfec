//! In-memory [`Database`] for tests and offline development.
//!
//! Does NOT speak SQL in general: it interprets exactly the statement shapes
//! this toolkit issues (schema creation, users/toasts inserts and selects,
//! counts, deletes, table listing) against plain maps. Anything else is a
//! `Remote` error naming the statement, so a drifting orchestrator fails a
//! test instead of silently passing.
//!
//! # Example
//!
//! ```rust
//! use toast_link::memory::MemoryDatabase;
//! use toast_link::{store, User};
//!
//! # async fn example() -> toast_link::Result<()> {
//! let db = MemoryDatabase::with_schema();
//! store::insert_user(&db, &User::new("u1", "Alice")).await?;
//! assert_eq!(store::count_users(&db).await?, 1);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::database::Database;
use crate::error::{LinkError, Result};
use crate::models::{Row, SqlStatement};

/// Timestamp assigned wherever the real database would use `datetime('now')`.
pub const FIXED_TIME: &str = "2024-01-01 00:00:00";

#[derive(Debug, Clone)]
struct StoredToast {
    toaster_id: String,
    toastie_id: String,
    toast_time: String,
}

#[derive(Debug, Default)]
struct State {
    tables: BTreeSet<String>,
    indexes: BTreeSet<String>,
    users: BTreeMap<String, String>,
    toasts: BTreeMap<String, StoredToast>,
    /// `(pattern, error message)`: a statement whose SQL or any parameter
    /// contains the pattern fails with the message.
    failures: Vec<(String, String)>,
}

/// In-memory database fake.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    state: Mutex<State>,
}

impl MemoryDatabase {
    /// An empty database with no tables (run a migration to create them).
    pub fn new() -> Self {
        Self::default()
    }

    /// A database with the `users` and `toasts` tables already present.
    pub fn with_schema() -> Self {
        let db = Self::default();
        {
            let mut state = db.state.lock().unwrap();
            state.tables.insert("users".to_string());
            state.tables.insert("toasts".to_string());
        }
        db
    }

    /// Make statements matching `pattern` fail with `message`.
    ///
    /// The pattern is matched as a substring of the SQL text and of every
    /// string parameter.
    pub fn fail_with(&self, pattern: impl Into<String>, message: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((pattern.into(), message.into()));
    }

    /// [`fail_with`](Self::fail_with) using a generic error message.
    pub fn fail_when(&self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        let message = format!("injected failure for `{pattern}`");
        self.fail_with(pattern, message);
    }

    /// Snapshot of the users table as `(user_id, name)` pairs.
    pub fn users_snapshot(&self) -> Vec<(String, String)> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect()
    }

    /// Snapshot of the toasts table as `(toast_id, toaster_id, toastie_id)`.
    pub fn toasts_snapshot(&self) -> Vec<(String, String, String)> {
        self.state
            .lock()
            .unwrap()
            .toasts
            .iter()
            .map(|(id, t)| (id.clone(), t.toaster_id.clone(), t.toastie_id.clone()))
            .collect()
    }
}

fn row(value: JsonValue) -> Row {
    value.as_object().cloned().unwrap_or_default()
}

fn remote_error(message: impl Into<String>) -> LinkError {
    LinkError::Remote {
        errors: vec![message.into()],
    }
}

/// First identifier of a schema object fragment, tolerating backticks and
/// double quotes (`` `users` (...`` / `users (...`).
fn object_name(fragment: &str) -> String {
    fragment
        .trim_start()
        .trim_start_matches(['`', '"'])
        .chars()
        .take_while(|c| !matches!(c, '`' | '"' | '(' | ' ' | '\t' | '\n' | '\r' | ';'))
        .collect()
}

fn param_str(statement: &SqlStatement, index: usize) -> Result<String> {
    statement
        .params
        .get(index)
        .and_then(JsonValue::as_str)
        .map(String::from)
        .ok_or_else(|| remote_error(format!("missing bind parameter {}", index + 1)))
}

impl State {
    fn require_table(&self, name: &str) -> Result<()> {
        if self.tables.contains(name) {
            Ok(())
        } else {
            Err(remote_error(format!("no such table: {name}")))
        }
    }

    fn toast_row(id: &str, toast: &StoredToast) -> Row {
        row(json!({
            "toastID": id,
            "toasterID": toast.toaster_id,
            "toastieID": toast.toastie_id,
            "toastTime": toast.toast_time,
        }))
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn query(&self, statement: &SqlStatement) -> Result<Vec<Row>> {
        let sql = statement.sql.trim();
        let mut state = self.state.lock().unwrap();

        for (pattern, message) in &state.failures {
            let param_hit = statement
                .params
                .iter()
                .filter_map(JsonValue::as_str)
                .any(|p| p.contains(pattern.as_str()));
            if sql.contains(pattern.as_str()) || param_hit {
                return Err(remote_error(message.clone()));
            }
        }

        // ── schema ──────────────────────────────────────────────────────
        if let Some(rest) = sql.strip_prefix("CREATE TABLE ") {
            let name = object_name(rest);
            if !state.tables.insert(name.clone()) {
                return Err(remote_error(format!("table {name} already exists")));
            }
            return Ok(vec![]);
        }
        if let Some(rest) = sql.strip_prefix("CREATE INDEX ") {
            let name = object_name(rest);
            if !state.indexes.insert(name.clone()) {
                return Err(remote_error(format!("index {name} already exists")));
            }
            return Ok(vec![]);
        }

        // ── users ───────────────────────────────────────────────────────
        if sql.starts_with("INSERT OR IGNORE INTO users")
            || sql.starts_with("INSERT INTO users")
        {
            state.require_table("users")?;
            let user_id = param_str(statement, 0)?;
            let name = param_str(statement, 1)?;
            if state.users.contains_key(&user_id) {
                if sql.starts_with("INSERT OR IGNORE") {
                    return Ok(vec![]);
                }
                return Err(remote_error("UNIQUE constraint failed: users.userID"));
            }
            state.users.insert(user_id, name);
            return Ok(vec![]);
        }
        if sql.starts_with("SELECT userID, name FROM users WHERE userID = ?") {
            state.require_table("users")?;
            let user_id = param_str(statement, 0)?;
            return Ok(state
                .users
                .get(&user_id)
                .map(|name| row(json!({ "userID": user_id, "name": name })))
                .into_iter()
                .collect());
        }
        if sql.starts_with("SELECT userID, name FROM users") {
            state.require_table("users")?;
            return Ok(state
                .users
                .iter()
                .map(|(id, name)| row(json!({ "userID": id, "name": name })))
                .collect());
        }
        if sql.starts_with("SELECT COUNT(*) as count FROM users") {
            state.require_table("users")?;
            return Ok(vec![row(json!({ "count": state.users.len() }))]);
        }
        if sql.starts_with("DELETE FROM users") {
            state.require_table("users")?;
            state.users.clear();
            return Ok(vec![]);
        }

        // ── toasts ──────────────────────────────────────────────────────
        if sql.starts_with("INSERT OR IGNORE INTO toasts")
            || sql.starts_with("INSERT INTO toasts")
        {
            state.require_table("toasts")?;
            let toast_id = param_str(statement, 0)?;
            let toaster_id = param_str(statement, 1)?;
            let toastie_id = param_str(statement, 2)?;
            let toast_time = if sql.contains("datetime('now')") {
                FIXED_TIME.to_string()
            } else {
                param_str(statement, 3)?
            };
            if state.toasts.contains_key(&toast_id) {
                if sql.starts_with("INSERT OR IGNORE") {
                    return Ok(vec![]);
                }
                return Err(remote_error("UNIQUE constraint failed: toasts.toastID"));
            }
            state.toasts.insert(
                toast_id,
                StoredToast {
                    toaster_id,
                    toastie_id,
                    toast_time,
                },
            );
            return Ok(vec![]);
        }
        if sql.starts_with("SELECT toastID, toasterID, toastieID, toastTime FROM toasts WHERE toasterID = ?")
        {
            state.require_table("toasts")?;
            let user_id = param_str(statement, 0)?;
            return Ok(state
                .toasts
                .iter()
                .filter(|(_, t)| t.toaster_id == user_id)
                .map(|(id, t)| State::toast_row(id, t))
                .collect());
        }
        if sql.starts_with("SELECT toastID, toasterID, toastieID, toastTime FROM toasts WHERE toastieID = ?")
        {
            state.require_table("toasts")?;
            let user_id = param_str(statement, 0)?;
            return Ok(state
                .toasts
                .iter()
                .filter(|(_, t)| t.toastie_id == user_id)
                .map(|(id, t)| State::toast_row(id, t))
                .collect());
        }
        if sql.starts_with("SELECT toastID, toasterID, toastieID, toastTime FROM toasts") {
            state.require_table("toasts")?;
            return Ok(state
                .toasts
                .iter()
                .map(|(id, t)| State::toast_row(id, t))
                .collect());
        }
        if sql.starts_with("SELECT COUNT(*) as count FROM toasts") {
            state.require_table("toasts")?;
            return Ok(vec![row(json!({ "count": state.toasts.len() }))]);
        }
        if sql.starts_with("DELETE FROM toasts") {
            state.require_table("toasts")?;
            state.toasts.clear();
            return Ok(vec![]);
        }

        // ── catalog ─────────────────────────────────────────────────────
        if sql.starts_with("SELECT name FROM sqlite_master") {
            return Ok(state
                .tables
                .iter()
                .map(|name| row(json!({ "name": name })))
                .collect());
        }

        Err(remote_error(format!(
            "unsupported statement in MemoryDatabase: {sql}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_table_twice_reports_already_exists() {
        let db = MemoryDatabase::new();
        db.query_sql("CREATE TABLE `users` (userID text)").await.unwrap();

        let err = db
            .query_sql("CREATE TABLE `users` (userID text)")
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_insert_without_table_is_no_such_table() {
        let db = MemoryDatabase::new();
        let err = db
            .query(&SqlStatement::with_params(
                "INSERT INTO users (userID, name) VALUES (?, ?)",
                vec![json!("u1"), json!("Alice")],
            ))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no such table: users"));
    }

    #[tokio::test]
    async fn test_injected_failure_matches_sql_and_params() {
        let db = MemoryDatabase::with_schema();
        db.fail_when("Bob");

        let err = db
            .query(&SqlStatement::with_params(
                "INSERT INTO users (userID, name) VALUES (?, ?)",
                vec![json!("u2"), json!("Bob")],
            ))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("injected failure"));

        db.query(&SqlStatement::with_params(
            "INSERT INTO users (userID, name) VALUES (?, ?)",
            vec![json!("u1"), json!("Alice")],
        ))
        .await
        .unwrap();
        assert_eq!(db.users_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_statement_is_an_error() {
        let db = MemoryDatabase::with_schema();
        let err = db.query_sql("VACUUM").await.unwrap_err();
        assert!(err.to_string().contains("unsupported statement"));
    }

    #[tokio::test]
    async fn test_object_name_parsing() {
        assert_eq!(object_name("`users` ("), "users");
        assert_eq!(object_name("users ("), "users");
        assert_eq!(object_name("\"toasts\"("), "toasts");
    }
}
