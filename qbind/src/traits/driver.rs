//! Driver trait: the prepare / bind / execute collaborator

use crate::error::{Error, Result};
use crate::row::Row;
use crate::value::Value;
use async_trait::async_trait;

/// Result of a mutating statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteResult {
    /// Number of rows affected by the statement
    pub rows_affected: u64,
    /// Last insert ID (for INSERT statements)
    pub last_insert_id: Option<u64>,
}

/// A database driver the statement builders run against.
///
/// The builders only ever finalize SQL text and an ordered list of values;
/// everything from here on (parsing, binding, network round trips, error
/// reporting) belongs to the driver. Errors are propagated to the caller of
/// `execute()` unchanged.
#[async_trait]
pub trait Driver: Send + Sync {
    /// A prepared statement with its bound parameters.
    type Statement: Send;

    /// Prepare `sql`, failing with the driver's error if it is malformed.
    async fn prepare(&self, sql: &str) -> Result<Self::Statement>;

    /// Bind `value` to the 1-based placeholder `position`.
    fn bind(&self, statement: &mut Self::Statement, position: usize, value: Value) -> Result<()>;

    /// Execute a mutating statement.
    async fn execute(&self, statement: Self::Statement) -> Result<ExecuteResult>;

    /// Execute a query and fetch every row in driver order.
    async fn fetch_all(&self, statement: Self::Statement) -> Result<Vec<Row>>;

    /// ID generated by the most recent INSERT on this connection.
    async fn last_insert_id(&self) -> Option<u64>;

    /// Run a raw statement over the text protocol, without parameters.
    async fn query(&self, sql: &str) -> Result<()>;
}

/// Positional parameters collected for one prepared statement.
///
/// Positions are 1-based like the placeholders they fill. Binding the same
/// position twice replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    slots: Vec<Option<Value>>,
}

impl BoundParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` at the 1-based `position`.
    pub fn bind(&mut self, position: usize, value: Value) -> Result<()> {
        if position == 0 {
            return Err(Error::Bind {
                position,
                reason: "positions start at 1".to_string(),
            });
        }
        if self.slots.len() < position {
            self.slots.resize(position, None);
        }
        self.slots[position - 1] = Some(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take the values in position order, rejecting unbound gaps.
    pub fn into_values(self) -> Result<Vec<Value>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| Error::Bind {
                    position: i + 1,
                    reason: "no value bound".to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_in_any_order() {
        let mut params = BoundParams::new();
        params.bind(2, Value::I32(65)).unwrap();
        params.bind(1, Value::I32(18)).unwrap();
        assert_eq!(
            params.into_values().unwrap(),
            vec![Value::I32(18), Value::I32(65)]
        );
    }

    #[test]
    fn test_position_zero_is_rejected() {
        let mut params = BoundParams::new();
        assert!(matches!(
            params.bind(0, Value::Null),
            Err(Error::Bind { position: 0, .. })
        ));
    }

    #[test]
    fn test_gap_is_rejected() {
        let mut params = BoundParams::new();
        params.bind(3, Value::Bool(true)).unwrap();
        assert!(matches!(
            params.into_values(),
            Err(Error::Bind { position: 1, .. })
        ));
    }
}
