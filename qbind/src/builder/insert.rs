//! INSERT builder

use crate::error::{Error, Result};
use crate::fragment::ValueList;
use crate::pattern::Pattern;
use crate::statement::Statement;
use crate::traits::{Driver, ExecuteResult, ToValue};
use crate::value::Value;

/// Builds `INSERT INTO table(columns) VALUES(...)`.
///
/// Each [`value`](Insert::value) call adds one entry to the VALUES list, in
/// column order.
pub struct Insert<'c, D: Driver> {
    driver: &'c D,
    base: String,
    values: ValueList,
}

impl<'c, D: Driver> Insert<'c, D> {
    pub fn new(driver: &'c D, table: &str, columns: &str) -> Self {
        Self {
            driver,
            base: format!("INSERT INTO {}({})", table, columns),
            values: ValueList::new(),
        }
    }

    /// Add a value bound through a single placeholder.
    pub fn value(self, value: impl ToValue) -> Self {
        self.value_with(value, Pattern::value())
    }

    /// Add a value rendered through `pattern`, e.g. `"UPPER({val})"`.
    ///
    /// The value is bound once per `{val}` in the pattern; a pattern without
    /// `{val}` (such as `"NOW()"`) binds nothing.
    pub fn value_with(mut self, value: impl ToValue, pattern: impl Into<Pattern>) -> Self {
        let pattern = pattern.into();
        self.values.push(pattern.expand_values(), value.to_value());
        self
    }

    /// Final SQL text. Only valid SQL once at least one value exists;
    /// [`build`](Insert::build) checks that.
    pub fn sql(&self) -> String {
        format!("{} VALUES({})", self.base, self.values.text())
    }

    /// Parameters in bind order.
    pub fn params(&self) -> &[Value] {
        self.values.ledger().snapshot()
    }

    /// Finalize into a [`Statement`], failing when no value was added.
    pub fn build(&self) -> Result<Statement> {
        if self.values.is_empty() {
            return Err(Error::Incomplete("INSERT without any value"));
        }
        Ok(Statement::with_params(self.sql(), self.params().to_vec()))
    }

    /// Execute and return the number of affected rows.
    pub async fn execute(&self) -> Result<u64> {
        Ok(self.execute_result().await?.rows_affected)
    }

    /// Execute and return affected rows together with the generated ID.
    pub async fn execute_result(&self) -> Result<ExecuteResult> {
        self.build()?.execute(self.driver).await
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::Builders;
    use crate::error::Error;
    use crate::testing::RecordingDriver;
    use crate::value::Value;

    #[test]
    fn test_values_in_column_order() {
        let driver = RecordingDriver::new();
        let insert = driver
            .insert("users", "name, age, active")
            .value("Alice")
            .value(30)
            .value(true);

        assert_eq!(insert.sql(), "INSERT INTO users(name, age, active) VALUES(?, ?, ?)");
        assert_eq!(
            insert.params(),
            &[Value::from("Alice"), Value::I32(30), Value::Bool(true)]
        );
    }

    #[test]
    fn test_value_patterns() {
        let driver = RecordingDriver::new();
        let insert = driver
            .insert("events", "code, created_at, range_lo, range_hi")
            .value_with("abc", "UPPER({val})")
            .value_with(Value::Null, "NOW()")
            .value_with(5, "{val}, {val} + 10");

        assert_eq!(
            insert.sql(),
            "INSERT INTO events(code, created_at, range_lo, range_hi) VALUES(UPPER(?), NOW(), ?, ? + 10)"
        );
        assert_eq!(
            insert.params(),
            &[Value::from("abc"), Value::I32(5), Value::I32(5)]
        );
    }

    #[tokio::test]
    async fn test_execute_binds_and_returns_rows_affected() {
        let driver = RecordingDriver::new().with_last_insert_id(42);
        let insert = driver.insert("users", "name").value("Bob");

        assert_eq!(insert.execute().await.unwrap(), 1);
        let result = insert.execute_result().await.unwrap();
        assert_eq!(result.last_insert_id, Some(42));

        let (sql, params) = driver.last();
        assert_eq!(sql, "INSERT INTO users(name) VALUES(?)");
        assert_eq!(params, vec![Value::from("Bob")]);
        assert_eq!(driver.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_without_values_is_rejected() {
        let driver = RecordingDriver::new();
        let insert = driver.insert("users", "name");

        assert!(matches!(insert.build(), Err(Error::Incomplete(_))));
        assert!(matches!(insert.execute().await, Err(Error::Incomplete(_))));
        assert!(driver.calls().is_empty());
    }
}
