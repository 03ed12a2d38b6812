//! In-memory driver that records every prepared statement and bind

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::traits::{BoundParams, Driver, ExecuteResult};
use crate::value::Value;

/// What the driver was asked to do with a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Execute,
    Fetch,
    Query,
}

/// One statement as seen by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub sql: String,
    /// `(position, value)` in the order `bind` was called
    pub binds: Vec<(usize, Value)>,
}

#[derive(Debug)]
pub struct RecordedStatement {
    sql: String,
    binds: Vec<(usize, Value)>,
    params: BoundParams,
}

#[derive(Debug, Default)]
pub struct RecordingDriver {
    calls: Mutex<Vec<RecordedCall>>,
    rows: Vec<Row>,
    rows_affected: u64,
    last_insert_id: Option<u64>,
    prepare_error: Option<String>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            rows_affected: 1,
            ..Self::default()
        }
    }

    /// Rows returned by every fetch.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_rows_affected(mut self, rows_affected: u64) -> Self {
        self.rows_affected = rows_affected;
        self
    }

    pub fn with_last_insert_id(mut self, id: u64) -> Self {
        self.last_insert_id = Some(id);
        self
    }

    /// Make every prepare fail with `message`.
    pub fn fail_prepare(mut self, message: &str) -> Self {
        self.prepare_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    /// SQL and values of the most recent call, values in position order.
    pub fn last(&self) -> (String, Vec<Value>) {
        let calls = self.lock();
        let call = calls.last().cloned().unwrap_or(RecordedCall {
            kind: CallKind::Query,
            sql: String::new(),
            binds: Vec::new(),
        });
        let mut binds = call.binds;
        binds.sort_by_key(|(position, _)| *position);
        (call.sql, binds.into_iter().map(|(_, v)| v).collect())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, kind: CallKind, statement: RecordedStatement) -> Result<()> {
        statement.params.into_values()?;
        self.lock().push(RecordedCall {
            kind,
            sql: statement.sql,
            binds: statement.binds,
        });
        Ok(())
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    type Statement = RecordedStatement;

    async fn prepare(&self, sql: &str) -> Result<Self::Statement> {
        if let Some(message) = &self.prepare_error {
            return Err(Error::Query(message.clone()));
        }
        Ok(RecordedStatement {
            sql: sql.to_string(),
            binds: Vec::new(),
            params: BoundParams::new(),
        })
    }

    fn bind(&self, statement: &mut Self::Statement, position: usize, value: Value) -> Result<()> {
        statement.params.bind(position, value.clone())?;
        statement.binds.push((position, value));
        Ok(())
    }

    async fn execute(&self, statement: Self::Statement) -> Result<ExecuteResult> {
        self.record(CallKind::Execute, statement)?;
        Ok(ExecuteResult {
            rows_affected: self.rows_affected,
            last_insert_id: self.last_insert_id,
        })
    }

    async fn fetch_all(&self, statement: Self::Statement) -> Result<Vec<Row>> {
        self.record(CallKind::Fetch, statement)?;
        Ok(self.rows.clone())
    }

    async fn last_insert_id(&self) -> Option<u64> {
        self.last_insert_id
    }

    async fn query(&self, sql: &str) -> Result<()> {
        self.lock().push(RecordedCall {
            kind: CallKind::Query,
            sql: sql.to_string(),
            binds: Vec::new(),
        });
        Ok(())
    }
}
