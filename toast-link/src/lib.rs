//! Client library for the toast-db backend database.
//!
//! The backing store is a hosted SQL database reachable two ways: the
//! provider's HTTP query endpoint (remote) and a developer-machine replica
//! driven through the provider CLI (local). Both are exposed behind the
//! [`Database`] trait so migrations, seeding, and the typed users/toasts
//! operations in [`store`] run unchanged against either target, or against
//! the in-memory fake in [`memory`] under test.
//!
//! # Examples
//!
//! ```rust,no_run
//! use toast_link::{migrate, store, RemoteCredentials, RemoteDatabase};
//!
//! # async fn example() -> toast_link::Result<()> {
//! let db = RemoteDatabase::builder(RemoteCredentials::from_env()?).build()?;
//!
//! let outcomes = migrate::apply_migration(&db, "CREATE TABLE x (y int);").await?;
//! println!("applied {} statements", outcomes.len());
//!
//! for user in store::list_users(&db).await? {
//!     println!("{}", user.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod database;
pub mod error;
pub mod local;
pub mod memory;
pub mod migrate;
pub mod models;
pub mod remote;
pub mod store;

pub use credentials::RemoteCredentials;
pub use database::Database;
pub use error::{LinkError, Result};
pub use local::LocalDatabase;
pub use models::{QueryResponse, Row, SqlStatement, Toast, User, UserToasts};
pub use remote::RemoteDatabase;
