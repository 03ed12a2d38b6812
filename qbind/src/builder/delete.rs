//! DELETE builder

use crate::builder::{assemble, Conditional};
use crate::clause::{Clause, ClauseKind};
use crate::error::Result;
use crate::statement::Statement;
use crate::traits::{Driver, ExecuteResult};
use crate::value::Value;

/// Builds `DELETE FROM table [WHERE ...]`.
pub struct Delete<'c, D: Driver> {
    driver: &'c D,
    base: String,
    where_clause: Clause,
}

impl<'c, D: Driver> Delete<'c, D> {
    pub fn new(driver: &'c D, table: &str) -> Self {
        Self {
            driver,
            base: format!("DELETE FROM {}", table),
            where_clause: Clause::new(ClauseKind::Where),
        }
    }

    pub fn sql(&self) -> String {
        assemble([self.base.as_str(), self.where_clause.text()])
    }

    pub fn params(&self) -> &[Value] {
        self.where_clause.ledger().snapshot()
    }

    pub fn build(&self) -> Statement {
        Statement::with_params(self.sql(), self.params().to_vec())
    }

    /// Execute and return the number of affected rows.
    pub async fn execute(&self) -> Result<u64> {
        Ok(self.execute_result().await?.rows_affected)
    }

    pub async fn execute_result(&self) -> Result<ExecuteResult> {
        self.build().execute(self.driver).await
    }
}

impl<D: Driver> Conditional for Delete<'_, D> {
    fn where_clause_mut(&mut self) -> &mut Clause {
        &mut self.where_clause
    }
}
