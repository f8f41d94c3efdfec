//! The executor seam shared by the remote endpoint and the local replica.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Row, SqlStatement};

/// A database that can execute one SQL statement per call.
///
/// Implemented by [`RemoteDatabase`](crate::remote::RemoteDatabase) (HTTP
/// query endpoint), [`LocalDatabase`](crate::local::LocalDatabase) (provider
/// CLI subprocess), and [`MemoryDatabase`](crate::memory::MemoryDatabase)
/// (in-process fake for tests). Orchestrators are written against this trait
/// so the same seeding or migration logic runs against any target.
///
/// Calls are stateless: each statement is sent once and discarded; no
/// session or transaction spans calls.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single statement and return the decoded rows.
    ///
    /// Zero rows is a valid result, distinct from an error.
    async fn query(&self, statement: &SqlStatement) -> Result<Vec<Row>>;

    /// Convenience wrapper for statements without parameters.
    async fn query_sql(&self, sql: &str) -> Result<Vec<Row>> {
        self.query(&SqlStatement::new(sql)).await
    }
}
