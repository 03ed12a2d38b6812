//! Fetched result rows

use crate::error::{Error, Result};
use crate::traits::FromValue;
use crate::value::Value;

/// A single fetched row.
///
/// Columns keep the order the driver returned them in and can be read
/// either by name or by position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from `(column, value)` pairs in driver order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let (columns, values) = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .unzip();
        Self { columns, values }
    }

    /// Column names in driver order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in driver order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column name.
    ///
    /// When a column name appears more than once (e.g. an unaliased join),
    /// the last occurrence wins, as it would in an associative fetch.
    pub fn get_value(&self, column: &str) -> Result<Value> {
        self.columns
            .iter()
            .rposition(|c| c == column)
            .map(|i| self.values[i].clone())
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
    }

    /// Get a value by zero-based column position.
    pub fn get_index(&self, index: usize) -> Result<Value> {
        self.values
            .get(index)
            .cloned()
            .ok_or_else(|| Error::ColumnNotFound(format!("#{}", index)))
    }

    /// Get a typed value by column name.
    ///
    /// A NULL read into a type that cannot hold it is
    /// [`Error::UnexpectedNull`]; use `Option<T>` for nullable columns.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self.get_value(column)?;
        let is_null = value.is_null();
        T::from_value(value).map_err(|e| {
            if is_null {
                Error::UnexpectedNull(column.to_string())
            } else {
                e
            }
        })
    }

    /// Iterate over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::from_pairs([("id", Value::I64(3)), ("name", Value::from("Alice"))])
    }

    #[test]
    fn test_access_by_name_and_index() {
        let row = sample();
        assert_eq!(row.get::<i64>("id").unwrap(), 3);
        assert_eq!(row.get_index(1).unwrap(), Value::from("Alice"));
        assert_eq!(row.columns(), ["id", "name"]);
    }

    #[test]
    fn test_missing_column() {
        let row = sample();
        assert!(matches!(row.get_value("age"), Err(Error::ColumnNotFound(c)) if c == "age"));
        assert!(row.get_index(5).is_err());
    }

    #[test]
    fn test_null_into_non_optional_type() {
        let row = Row::from_pairs([("age", Value::Null), ("email", Value::Null)]);
        assert!(matches!(
            row.get::<i64>("age"),
            Err(Error::UnexpectedNull(c)) if c == "age"
        ));
        assert!(matches!(
            row.get::<String>("email"),
            Err(Error::UnexpectedNull(c)) if c == "email"
        ));
        assert_eq!(row.get::<Option<i64>>("age").unwrap(), None);
        assert_eq!(row.get::<Value>("age").unwrap(), Value::Null);
    }

    #[test]
    fn test_non_null_mismatch_stays_type_conversion() {
        let row = sample();
        assert!(matches!(
            row.get::<i64>("name"),
            Err(Error::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_duplicate_column_last_wins() {
        let row = Row::from_pairs([
            ("id", Value::I64(1)),
            ("id", Value::I64(2)),
        ]);
        assert_eq!(row.get::<i64>("id").unwrap(), 2);
        assert_eq!(row.get_index(0).unwrap(), Value::I64(1));
    }

    #[test]
    fn test_iteration_keeps_driver_order() {
        let row = sample();
        let names: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(names, vec!["id", "name"]);
    }
}
