//! UPDATE builder

use crate::builder::{assemble, Conditional};
use crate::clause::{Clause, ClauseKind};
use crate::error::{Error, Result};
use crate::fragment::ValueList;
use crate::pattern::{Expansion, Pattern};
use crate::statement::Statement;
use crate::traits::{Driver, ExecuteResult, ToValue};
use crate::value::Value;

/// Builds `UPDATE table SET ... [WHERE ...]`.
///
/// SET assignments and WHERE conditions keep separate ledgers. Because the
/// SET list always precedes WHERE in the text, every SET value is bound
/// before every WHERE value, however the calls were interleaved.
pub struct Update<'c, D: Driver> {
    driver: &'c D,
    base: String,
    sets: ValueList,
    where_clause: Clause,
}

impl<'c, D: Driver> Update<'c, D> {
    pub fn new(driver: &'c D, table: &str) -> Self {
        Self {
            driver,
            base: format!("UPDATE {}", table),
            sets: ValueList::new(),
            where_clause: Clause::new(ClauseKind::Where),
        }
    }

    /// Add `field = ?`.
    pub fn set(self, field: &str, value: impl ToValue) -> Self {
        self.set_with(field, value, Pattern::value())
    }

    /// Add `field = <pattern>`, e.g. `set_with("hits", 1, "{cam} + {val}")`.
    ///
    /// Inside the pattern `{cam}` is the field name and `{rel}` is `=`.
    pub fn set_with(mut self, field: &str, value: impl ToValue, pattern: impl Into<Pattern>) -> Self {
        let expansion = pattern.into().expand(field, "=");
        let item = Expansion {
            text: format!("{} = {}", field, expansion.text),
            placeholders: expansion.placeholders,
        };
        self.sets.push(item, value.to_value());
        self
    }

    /// Final SQL text. Only valid SQL once at least one assignment exists;
    /// [`build`](Update::build) checks that.
    pub fn sql(&self) -> String {
        let sets = format!("SET {}", self.sets.text());
        assemble([self.base.as_str(), sets.as_str(), self.where_clause.text()])
    }

    /// Parameters in bind order: SET values, then WHERE values.
    pub fn params(&self) -> Vec<Value> {
        let mut ledger = self.sets.ledger().clone();
        ledger.extend(self.where_clause.ledger());
        ledger.into_values()
    }

    /// Finalize into a [`Statement`], failing when nothing is being set.
    pub fn build(&self) -> Result<Statement> {
        if self.sets.is_empty() {
            return Err(Error::Incomplete("UPDATE without any SET assignment"));
        }
        Ok(Statement::with_params(self.sql(), self.params()))
    }

    /// Execute and return the number of affected rows.
    pub async fn execute(&self) -> Result<u64> {
        Ok(self.execute_result().await?.rows_affected)
    }

    pub async fn execute_result(&self) -> Result<ExecuteResult> {
        self.build()?.execute(self.driver).await
    }
}

impl<D: Driver> Conditional for Update<'_, D> {
    fn where_clause_mut(&mut self) -> &mut Clause {
        &mut self.where_clause
    }
}
