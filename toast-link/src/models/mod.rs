//! Data models for the toast-link client library.
//!
//! Defines the wire types for the remote query endpoint and the typed
//! `users` / `toasts` entities layered on top of raw rows.

pub mod query_response;
pub mod sql_statement;
pub mod toast;
pub mod user;

pub use query_response::{QueryMeta, QueryResponse, ResultSet, Row};
pub use sql_statement::SqlStatement;
pub use toast::{Toast, UserToasts};
pub use user::User;
