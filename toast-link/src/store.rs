//! Typed operations over the `users` and `toasts` tables.
//!
//! Everything here is a thin sequence of [`Database::query`] calls; the
//! statements mirror what the backend routes issue. The one deliberate
//! exception to strict sequencing is [`send_toast`], whose two existence
//! checks are independent reads and run concurrently.

use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};

use crate::database::Database;
use crate::error::{LinkError, Result};
use crate::models::{Row, SqlStatement, Toast, User, UserToasts};

fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T> {
    serde_json::from_value(JsonValue::Object(row)).map_err(LinkError::from)
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>> {
    rows.into_iter().map(decode_row).collect()
}

fn count_from(rows: Vec<Row>) -> u64 {
    rows.first()
        .and_then(|row| row.get("count"))
        .and_then(JsonValue::as_u64)
        .unwrap_or(0)
}

/// All users.
pub async fn list_users<D: Database + ?Sized>(db: &D) -> Result<Vec<User>> {
    decode_rows(db.query_sql("SELECT userID, name FROM users").await?)
}

/// One user by id, or `None`.
pub async fn get_user<D: Database + ?Sized>(db: &D, user_id: &str) -> Result<Option<User>> {
    let rows = db
        .query(&SqlStatement::with_params(
            "SELECT userID, name FROM users WHERE userID = ?",
            vec![json!(user_id)],
        ))
        .await?;
    rows.into_iter().next().map(decode_row).transpose()
}

/// Insert a user; fails on a duplicate primary key.
pub async fn insert_user<D: Database + ?Sized>(db: &D, user: &User) -> Result<()> {
    db.query(&SqlStatement::with_params(
        "INSERT INTO users (userID, name) VALUES (?, ?)",
        vec![json!(user.user_id), json!(user.name)],
    ))
    .await
    .map(|_| ())
}

/// Insert a user, silently no-opping if the primary key already exists.
pub async fn insert_user_ignore<D: Database + ?Sized>(db: &D, user: &User) -> Result<()> {
    db.query(&SqlStatement::with_params(
        "INSERT OR IGNORE INTO users (userID, name) VALUES (?, ?)",
        vec![json!(user.user_id), json!(user.name)],
    ))
    .await
    .map(|_| ())
}

/// All toasts.
pub async fn list_toasts<D: Database + ?Sized>(db: &D) -> Result<Vec<Toast>> {
    decode_rows(
        db.query_sql("SELECT toastID, toasterID, toastieID, toastTime FROM toasts")
            .await?,
    )
}

/// Insert a toast, letting the database assign the timestamp.
pub async fn insert_toast<D: Database + ?Sized>(db: &D, toast: &Toast) -> Result<()> {
    db.query(&SqlStatement::with_params(
        "INSERT INTO toasts (toastID, toasterID, toastieID, toastTime) VALUES (?, ?, ?, datetime('now'))",
        vec![
            json!(toast.toast_id),
            json!(toast.toaster_id),
            json!(toast.toastie_id),
        ],
    ))
    .await
    .map(|_| ())
}

/// Ignore-on-conflict variant of [`insert_toast`].
pub async fn insert_toast_ignore<D: Database + ?Sized>(db: &D, toast: &Toast) -> Result<()> {
    db.query(&SqlStatement::with_params(
        "INSERT OR IGNORE INTO toasts (toastID, toasterID, toastieID, toastTime) VALUES (?, ?, ?, datetime('now'))",
        vec![
            json!(toast.toast_id),
            json!(toast.toaster_id),
            json!(toast.toastie_id),
        ],
    ))
    .await
    .map(|_| ())
}

/// Insert a toast carrying its original timestamp (sync/mirror path).
pub async fn insert_toast_with_time<D: Database + ?Sized>(db: &D, toast: &Toast) -> Result<()> {
    db.query(&SqlStatement::with_params(
        "INSERT INTO toasts (toastID, toasterID, toastieID, toastTime) VALUES (?, ?, ?, ?)",
        vec![
            json!(toast.toast_id),
            json!(toast.toaster_id),
            json!(toast.toastie_id),
            json!(toast.toast_time),
        ],
    ))
    .await
    .map(|_| ())
}

/// Record a toast after verifying both participants exist.
///
/// The two existence checks are read-only and independent, so they are
/// issued concurrently; the insert only happens once both have answered.
pub async fn send_toast<D: Database + ?Sized>(db: &D, toast: &Toast) -> Result<()> {
    let (toaster, toastie) = tokio::join!(
        get_user(db, &toast.toaster_id),
        get_user(db, &toast.toastie_id)
    );
    if toaster?.is_none() {
        return Err(LinkError::UnknownUser(toast.toaster_id.clone()));
    }
    if toastie?.is_none() {
        return Err(LinkError::UnknownUser(toast.toastie_id.clone()));
    }
    insert_toast(db, toast).await
}

/// Toasts involving one user, split into sent and received.
pub async fn toasts_for_user<D: Database + ?Sized>(db: &D, user_id: &str) -> Result<UserToasts> {
    let sent = db
        .query(&SqlStatement::with_params(
            "SELECT toastID, toasterID, toastieID, toastTime FROM toasts WHERE toasterID = ?",
            vec![json!(user_id)],
        ))
        .await?;
    let received = db
        .query(&SqlStatement::with_params(
            "SELECT toastID, toasterID, toastieID, toastTime FROM toasts WHERE toastieID = ?",
            vec![json!(user_id)],
        ))
        .await?;
    Ok(UserToasts {
        sent: decode_rows(sent)?,
        received: decode_rows(received)?,
    })
}

pub async fn count_users<D: Database + ?Sized>(db: &D) -> Result<u64> {
    Ok(count_from(
        db.query_sql("SELECT COUNT(*) as count FROM users").await?,
    ))
}

pub async fn count_toasts<D: Database + ?Sized>(db: &D) -> Result<u64> {
    Ok(count_from(
        db.query_sql("SELECT COUNT(*) as count FROM toasts").await?,
    ))
}

/// Delete every toast. Runs before [`delete_all_users`] (FK order).
pub async fn delete_all_toasts<D: Database + ?Sized>(db: &D) -> Result<()> {
    db.query_sql("DELETE FROM toasts").await.map(|_| ())
}

/// Delete every user. Only safe once the toasts table is empty.
pub async fn delete_all_users<D: Database + ?Sized>(db: &D) -> Result<()> {
    db.query_sql("DELETE FROM users").await.map(|_| ())
}

/// User-visible table names, excluding the provider's internal tables.
pub async fn list_tables<D: Database + ?Sized>(db: &D) -> Result<Vec<String>> {
    let rows = db
        .query_sql(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE '_cf%' ORDER BY name",
        )
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.get("name").and_then(JsonValue::as_str).map(String::from))
        .collect())
}
