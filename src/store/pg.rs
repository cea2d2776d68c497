//! PostgreSQL pool, connection bootstrap and schema setup.

use super::{Row, Store};
use crate::error::StoreError;
use crate::sql::{statements, SqlValue};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Row as _, TypeInfo};
use std::time::Duration;

/// How many times to try the initial connection and how long to wait between tries.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(3),
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build the pool and prove connectivity, retrying per `retry`.
    /// A malformed connection string fails at once.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        retry: RetryPolicy,
    ) -> Result<Self, StoreError> {
        let attempts = retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            tracing::info!(attempt, max_connections, "connecting to database");
            let result = PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(database_url)
                .await;
            match result {
                Ok(pool) => {
                    tracing::info!("connected to the database");
                    return Ok(Self { pool });
                }
                Err(e @ sqlx::Error::Configuration(_)) => return Err(e.into()),
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        error = %e,
                        "unable to connect to database, retrying in {:?} ({}/{})",
                        retry.delay,
                        attempt,
                        attempts
                    );
                    tokio::time::sleep(retry.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Create the beasts table if it does not exist. Existing tables are left alone.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(statements::CREATE_BEASTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn bind_all<'q>(sql: &'q str, params: &[SqlValue]) -> Query<'q, Postgres, PgArguments> {
    tracing::debug!(sql = %sql, params = ?params, "query");
    let mut query = sqlx::query(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    query
}

fn row_to_values(row: &PgRow) -> Result<Row, StoreError> {
    row.columns()
        .iter()
        .map(|col| -> Result<SqlValue, StoreError> {
            let idx = col.ordinal();
            let value = match col.type_info().name() {
                "JSON" | "JSONB" => row
                    .try_get::<Option<serde_json::Value>, _>(idx)?
                    .map_or(SqlValue::Null, SqlValue::Json),
                _ => row
                    .try_get::<Option<String>, _>(idx)?
                    .map_or(SqlValue::Null, SqlValue::Text),
            };
            Ok(value)
        })
        .collect()
}

#[async_trait]
impl Store for PgStore {
    async fn acquire(&self) -> Result<(), StoreError> {
        let _conn = self.pool.acquire().await?;
        Ok(())
    }

    async fn exec(&self, sql: &str, params: &[SqlValue]) -> Result<u64, StoreError> {
        let result = bind_all(sql, params).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        let rows = bind_all(sql, params).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_values).collect()
    }

    async fn query_row(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError> {
        let row = bind_all(sql, params).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_values).transpose()
    }
}
