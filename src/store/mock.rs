//! `MockStore`, a scripted test double for `Store`.
//!
//! Expectations are consumed in order. Each store call must match the next
//! expectation's kind and SQL text (whitespace-insensitive) and, when given,
//! its arguments; anything else fails with `StoreError::Unexpected`.
//!
//! ```ignore
//! let store = MockStore::new();
//! store
//!     .expect_exec("DELETE FROM beasts WHERE beast_name=$1")
//!     .with_args(["TestBeast"])
//!     .will_return_result(1);
//! ```

use super::{Row, Store};
use crate::error::StoreError;
use crate::sql::SqlValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallKind {
    Exec,
    Query,
    QueryRow,
}

/// A store call as the mock received it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub sql: String,
    pub args: Vec<SqlValue>,
}

#[derive(Debug)]
enum Outcome {
    Rows(Vec<Row>),
    Affected(u64),
    Error(String),
}

#[derive(Debug)]
struct Expectation {
    kind: CallKind,
    sql: String,
    args: Option<Vec<SqlValue>>,
    outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct MockStore {
    expected: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<RecordedCall>>,
    acquire_fails: AtomicBool,
}

/// Pending expectation; registered once an outcome is chosen.
#[must_use = "an expectation is only registered by a will_return_* call"]
pub struct ExpectationBuilder<'a> {
    store: &'a MockStore,
    kind: CallKind,
    sql: String,
    args: Option<Vec<SqlValue>>,
}

impl<'a> ExpectationBuilder<'a> {
    pub fn with_args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn will_return_rows(self, rows: Vec<Row>) {
        self.register(Outcome::Rows(rows));
    }

    pub fn will_return_result(self, rows_affected: u64) {
        self.register(Outcome::Affected(rows_affected));
    }

    /// The call fails as a database error carrying `message`.
    pub fn will_return_error(self, message: impl Into<String>) {
        self.register(Outcome::Error(message.into()));
    }

    fn register(self, outcome: Outcome) {
        lock(&self.store.expected).push_back(Expectation {
            kind: self.kind,
            sql: self.sql,
            args: self.args,
            outcome,
        });
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn normalize(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_exec(&self, sql: &str) -> ExpectationBuilder<'_> {
        self.expect(CallKind::Exec, sql)
    }

    pub fn expect_query(&self, sql: &str) -> ExpectationBuilder<'_> {
        self.expect(CallKind::Query, sql)
    }

    pub fn expect_query_row(&self, sql: &str) -> ExpectationBuilder<'_> {
        self.expect(CallKind::QueryRow, sql)
    }

    fn expect(&self, kind: CallKind, sql: &str) -> ExpectationBuilder<'_> {
        ExpectationBuilder {
            store: self,
            kind,
            sql: normalize(sql),
            args: None,
        }
    }

    /// Make every `acquire` fail, as if the database were unreachable.
    pub fn fail_acquire(&self) {
        self.acquire_fails.store(true, Ordering::SeqCst);
    }

    /// Every call received so far, including unexpected ones.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Err with a description of the expectations no call consumed.
    pub fn expectations_were_met(&self) -> Result<(), String> {
        let remaining = lock(&self.expected);
        if remaining.is_empty() {
            return Ok(());
        }
        let pending: Vec<String> = remaining
            .iter()
            .map(|e| format!("{:?} {}", e.kind, e.sql))
            .collect();
        Err(format!("unfulfilled expectations: {}", pending.join("; ")))
    }

    fn consume(&self, kind: CallKind, sql: &str, params: &[SqlValue]) -> Result<Outcome, StoreError> {
        let sql = normalize(sql);
        lock(&self.calls).push(RecordedCall {
            kind,
            sql: sql.clone(),
            args: params.to_vec(),
        });

        let mut expected = lock(&self.expected);
        let next = expected
            .front()
            .ok_or_else(|| StoreError::Unexpected(format!("{kind:?} {sql}: no expectation left")))?;
        if next.kind != kind || next.sql != sql {
            return Err(StoreError::Unexpected(format!(
                "{kind:?} {sql}: expected {:?} {}",
                next.kind, next.sql
            )));
        }
        if let Some(args) = &next.args {
            if args.as_slice() != params {
                return Err(StoreError::Unexpected(format!(
                    "{kind:?} {sql}: args {params:?} do not match {args:?}"
                )));
            }
        }
        let next = expected
            .pop_front()
            .ok_or_else(|| StoreError::Unexpected(format!("{kind:?} {sql}: no expectation left")))?;
        match next.outcome {
            Outcome::Error(message) => Err(StoreError::Database(sqlx::Error::Protocol(message))),
            outcome => Ok(outcome),
        }
    }
}

#[async_trait]
impl Store for MockStore {
    async fn acquire(&self) -> Result<(), StoreError> {
        if self.acquire_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    async fn exec(&self, sql: &str, params: &[SqlValue]) -> Result<u64, StoreError> {
        match self.consume(CallKind::Exec, sql, params)? {
            Outcome::Affected(n) => Ok(n),
            other => Err(StoreError::Unexpected(format!("exec scripted with {other:?}"))),
        }
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        match self.consume(CallKind::Query, sql, params)? {
            Outcome::Rows(rows) => Ok(rows),
            other => Err(StoreError::Unexpected(format!("query scripted with {other:?}"))),
        }
    }

    async fn query_row(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError> {
        match self.consume(CallKind::QueryRow, sql, params)? {
            Outcome::Rows(rows) => Ok(rows.into_iter().next()),
            other => Err(StoreError::Unexpected(format!("query_row scripted with {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_expectations_in_order() {
        let store = MockStore::new();
        store
            .expect_exec("DELETE FROM beasts WHERE beast_name=$1")
            .with_args(["Owlbear"])
            .will_return_result(1);
        store.expect_query("SELECT 1").will_return_rows(vec![vec![SqlValue::Text("1".into())]]);

        let affected = store
            .exec("DELETE FROM beasts  WHERE beast_name=$1", &[SqlValue::from("Owlbear")])
            .await
            .unwrap();
        assert_eq!(affected, 1);
        let rows = store.query("SELECT 1", &[]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(store.expectations_were_met().is_ok());
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn mismatched_args_are_unexpected() {
        let store = MockStore::new();
        store
            .expect_exec("DELETE FROM beasts WHERE beast_name=$1")
            .with_args(["Owlbear"])
            .will_return_result(1);

        let err = store
            .exec("DELETE FROM beasts WHERE beast_name=$1", &[SqlValue::from("Kobold")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unexpected(_)));
        assert!(store.expectations_were_met().is_err());
    }

    #[tokio::test]
    async fn call_without_expectation_is_unexpected() {
        let store = MockStore::new();
        let err = store.query_row("SELECT 1", &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Unexpected(_)));
        assert_eq!(store.calls()[0].kind, CallKind::QueryRow);
    }

    #[tokio::test]
    async fn scripted_error_surfaces_as_database_error() {
        let store = MockStore::new();
        store.expect_query("SELECT 1").will_return_error("connection reset");
        let err = store.query("SELECT 1", &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn query_row_with_no_rows_is_none() {
        let store = MockStore::new();
        store.expect_query_row("SELECT 1").will_return_rows(vec![]);
        assert_eq!(store.query_row("SELECT 1", &[]).await.unwrap(), None);
    }

    #[tokio::test]
    async fn acquire_can_be_made_to_fail() {
        let store = MockStore::new();
        assert!(store.acquire().await.is_ok());
        store.fail_acquire();
        assert!(store.acquire().await.is_err());
    }
}
