//! Database abstraction layer
//!
//! This module provides a trait-based abstraction over query execution,
//! so the reporting flow can run against PostgreSQL or an in-memory stand-in
//! in tests.

pub mod postgres;
pub mod types;

use crate::error::DbResult;
use tokio_postgres::types::ToSql;

// Re-export main types
pub use types::{CellValue, ColumnDef, DataType, QueryResults, Row};

/// An open database session.
///
/// A session is exclusively owned by one reporting pass. `close` consumes it,
/// so a released session cannot be used again.
#[allow(async_fn_in_trait)]
pub trait Database: Sized {
    /// Execute a SQL query and return results
    ///
    /// # Errors
    /// Returns `DbError::QueryFailed` if query execution fails
    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults> {
        self.execute_query_with_params(sql, &[]).await
    }

    /// Execute a SQL query with bind parameters (`$1`, `$2`, ...)
    ///
    /// A query returning zero rows yields an empty table that still carries
    /// the column names and types.
    ///
    /// # Errors
    /// Returns `DbError::QueryFailed` if query execution fails
    async fn execute_query_with_params(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> DbResult<QueryResults>;

    /// Release the session
    async fn close(self);
}
