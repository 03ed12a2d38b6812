//! SELECT builder

use std::fmt;

use crate::builder::{assemble, Conditional};
use crate::clause::{Clause, ClauseKind, Connector};
use crate::error::Result;
use crate::pattern::Pattern;
use crate::row::Row;
use crate::statement::Statement;
use crate::traits::{Driver, FromRow, ToValue};
use crate::value::Value;

/// Builds `SELECT columns FROM table` with joins, WHERE, GROUP BY, HAVING,
/// ORDER BY and LIMIT.
///
/// Segments are always emitted in that order, whatever order the calls were
/// made in. Joins accumulate; `groupby`, `orderby` and `limit` replace any
/// earlier value. WHERE parameters are bound before HAVING parameters,
/// matching their position in the text.
pub struct Select<'c, D: Driver> {
    driver: &'c D,
    base: String,
    joins: Vec<String>,
    where_clause: Clause,
    group_by: Option<String>,
    having: Clause,
    order_by: Option<String>,
    limit: Option<String>,
}

impl<'c, D: Driver> Select<'c, D> {
    pub fn new(driver: &'c D, table: &str, columns: &str) -> Self {
        Self {
            driver,
            base: format!("SELECT {} FROM {}", columns, table),
            joins: Vec::new(),
            where_clause: Clause::new(ClauseKind::Where),
            group_by: None,
            having: Clause::new(ClauseKind::Having),
            order_by: None,
            limit: None,
        }
    }

    /// `INNER JOIN expr`, e.g. `"roles r ON r.id = u.role_id"`.
    pub fn innerjoin(self, expr: &str) -> Self {
        self.join("INNER JOIN", expr)
    }

    /// `LEFT JOIN expr`
    pub fn leftjoin(self, expr: &str) -> Self {
        self.join("LEFT JOIN", expr)
    }

    /// `RIGHT JOIN expr`
    pub fn rightjoin(self, expr: &str) -> Self {
        self.join("RIGHT JOIN", expr)
    }

    fn join(mut self, kind: &str, expr: &str) -> Self {
        self.joins.push(format!("{} {}", kind, expr));
        self
    }

    /// `GROUP BY expr`
    pub fn groupby(mut self, expr: &str) -> Self {
        self.group_by = Some(format!("GROUP BY {}", expr));
        self
    }

    /// `ORDER BY expr`
    pub fn orderby(mut self, expr: &str) -> Self {
        self.order_by = Some(format!("ORDER BY {}", expr));
        self
    }

    /// `LIMIT expr`, e.g. `10` or `"20, 10"`.
    pub fn limit(mut self, expr: impl fmt::Display) -> Self {
        self.limit = Some(format!("LIMIT {}", expr));
        self
    }

    /// Start the HAVING clause.
    pub fn having(self, field: &str, operator: &str, value: impl ToValue) -> Result<Self> {
        self.having_with(field, operator, value, Pattern::condition())
    }

    /// Add a HAVING condition joined with AND.
    pub fn having_and(self, field: &str, operator: &str, value: impl ToValue) -> Result<Self> {
        self.having_and_with(field, operator, value, Pattern::condition())
    }

    /// Add a HAVING condition joined with OR.
    pub fn having_or(self, field: &str, operator: &str, value: impl ToValue) -> Result<Self> {
        self.having_or_with(field, operator, value, Pattern::condition())
    }

    pub fn having_with(
        self,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        self.push_having(Connector::Initial, field, operator, value, pattern)
    }

    pub fn having_and_with(
        self,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        self.push_having(Connector::And, field, operator, value, pattern)
    }

    pub fn having_or_with(
        self,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        self.push_having(Connector::Or, field, operator, value, pattern)
    }

    fn push_having(
        mut self,
        connector: Connector,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        self.having
            .chain(connector, field, operator, value.to_value(), &pattern.into())?;
        Ok(self)
    }

    /// Final SQL text.
    pub fn sql(&self) -> String {
        let joins = self.joins.join(" ");
        assemble([
            self.base.as_str(),
            joins.as_str(),
            self.where_clause.text(),
            self.group_by.as_deref().unwrap_or_default(),
            self.having.text(),
            self.order_by.as_deref().unwrap_or_default(),
            self.limit.as_deref().unwrap_or_default(),
        ])
    }

    /// Parameters in bind order: WHERE first, then HAVING.
    pub fn params(&self) -> Vec<Value> {
        let mut ledger = self.where_clause.ledger().clone();
        ledger.extend(self.having.ledger());
        ledger.into_values()
    }

    pub fn build(&self) -> Statement {
        Statement::with_params(self.sql(), self.params())
    }

    /// Execute and fetch every row, in the order the driver returns them.
    ///
    /// No matching rows is an empty vector, not an error.
    pub async fn execute(&self) -> Result<Vec<Row>> {
        self.build().fetch_all(self.driver).await
    }

    /// Execute and map every row through [`FromRow`].
    pub async fn fetch_as<T: FromRow>(&self) -> Result<Vec<T>> {
        self.build().fetch_as(self.driver).await
    }
}

impl<D: Driver> Conditional for Select<'_, D> {
    fn where_clause_mut(&mut self) -> &mut Clause {
        &mut self.where_clause
    }
}
