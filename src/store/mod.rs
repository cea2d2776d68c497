//! Data access: the `Store` capability the handlers run against.
//!
//! `PgStore` is the pooled PostgreSQL implementation used in production;
//! `MockStore` replays scripted statements for tests without a database and
//! is only built for tests or with the `test-util` feature.

#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod pg;

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockStore;
pub use pg::{PgStore, RetryPolicy};

use crate::error::StoreError;
use crate::sql::SqlValue;
use async_trait::async_trait;

/// One result row, columns in select-list order.
pub type Row = Vec<SqlValue>;

/// Pooled store access. Implementations must be safe for concurrent use.
#[async_trait]
pub trait Store: Send + Sync {
    /// Check a connection out of the pool and hand it straight back.
    async fn acquire(&self) -> Result<(), StoreError>;

    /// Execute a statement; returns the affected-row count.
    async fn exec(&self, sql: &str, params: &[SqlValue]) -> Result<u64, StoreError>;

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError>;

    /// Run a query expected to produce at most one row. `None` when it produced none.
    async fn query_row(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError>;
}
