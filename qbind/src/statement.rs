//! Finalized statements: SQL text plus parameters in bind order

use tracing::{debug, trace};

use crate::error::Result;
use crate::row::Row;
use crate::traits::{Driver, ExecuteResult, FromRow, ToValue};
use crate::value::Value;

/// SQL text with its positional parameters.
///
/// Every builder produces one of these from `build()`. It can also be
/// assembled by hand for statements the builders do not cover.
///
/// ```ignore
/// use qbind::Statement;
///
/// let result = Statement::new("UPDATE counters SET hits = hits + 1 WHERE id = ?")
///     .bind(7)
///     .execute(&conn)
///     .await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    /// Create a new statement with the given SQL.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub(crate) fn with_params(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Bind a single value to the next placeholder.
    pub fn bind<T: ToValue>(mut self, value: T) -> Self {
        self.params.push(value.to_value());
        self
    }

    /// Bind multiple values, in order.
    pub fn bind_all<T: ToValue>(mut self, values: &[T]) -> Self {
        self.params.extend(values.iter().map(ToValue::to_value));
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Prepare on `driver` and bind parameter `i` to position `i + 1`.
    pub async fn prepare_on<D: Driver>(&self, driver: &D) -> Result<D::Statement> {
        debug!(sql = %self.sql, params = self.params.len(), "preparing statement");
        let mut prepared = driver.prepare(&self.sql).await?;
        for (i, value) in self.params.iter().enumerate() {
            let position = i + 1;
            trace!(position, value = ?value, "binding parameter");
            driver.bind(&mut prepared, position, value.clone())?;
        }
        Ok(prepared)
    }

    /// Execute the statement and return the driver's result.
    pub async fn execute<D: Driver>(&self, driver: &D) -> Result<ExecuteResult> {
        let prepared = self.prepare_on(driver).await?;
        let result = driver.execute(prepared).await?;
        debug!(rows_affected = result.rows_affected, "statement executed");
        Ok(result)
    }

    /// Fetch all rows.
    pub async fn fetch_all<D: Driver>(&self, driver: &D) -> Result<Vec<Row>> {
        let prepared = self.prepare_on(driver).await?;
        let rows = driver.fetch_all(prepared).await?;
        debug!(rows = rows.len(), "rows fetched");
        Ok(rows)
    }

    /// Fetch all rows mapped through [`FromRow`].
    pub async fn fetch_as<T: FromRow, D: Driver>(&self, driver: &D) -> Result<Vec<T>> {
        self.fetch_all(driver)
            .await?
            .iter()
            .map(T::from_row)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDriver;

    #[tokio::test]
    async fn test_binds_positions_in_order() {
        let driver = RecordingDriver::new();
        Statement::new("SELECT * FROM t WHERE a = ? AND b = ?")
            .bind(1)
            .bind("two")
            .execute(&driver)
            .await
            .unwrap();

        let calls = driver.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].sql, "SELECT * FROM t WHERE a = ? AND b = ?");
        assert_eq!(
            calls[0].binds,
            vec![(1, Value::I32(1)), (2, Value::from("two"))]
        );
    }

    #[tokio::test]
    async fn test_prepare_error_is_propagated() {
        let driver = RecordingDriver::new().fail_prepare("syntax error near 'FORM'");
        let err = Statement::new("SELECT * FORM t")
            .execute(&driver)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_bind_all() {
        let stmt = Statement::new("x").bind_all(&[1i64, 2, 3]);
        assert_eq!(
            stmt.params(),
            &[Value::I64(1), Value::I64(2), Value::I64(3)]
        );
    }
}
