//! Statement builders for INSERT, SELECT, UPDATE and DELETE
//!
//! Builders are created from any [`Driver`] through the [`Builders`]
//! extension trait and consumed by value while being configured:
//!
//! ```ignore
//! use qbind::{Builders, Conditional};
//!
//! let rows = conn
//!     .update("users")
//!     .set("name", "Alice")
//!     .where_("id", "=", 3)?
//!     .execute()
//!     .await?;
//! ```
//!
//! Clause calls (`where_*`, `having_*`) return `Result<Self>`: chaining an
//! AND/OR condition onto an empty clause, or starting a clause twice, fails
//! with [`Error::CallOrder`](crate::Error::CallOrder) instead of producing
//! broken SQL.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;

use crate::clause::{Clause, Connector};
use crate::error::Result;
use crate::pattern::Pattern;
use crate::traits::{Driver, ToValue};

/// Builder constructors available on every driver.
pub trait Builders: Driver + Sized {
    /// `INSERT INTO table(columns)`
    fn insert(&self, table: &str, columns: &str) -> Insert<'_, Self> {
        Insert::new(self, table, columns)
    }

    /// `SELECT * FROM table`
    fn select(&self, table: &str) -> Select<'_, Self> {
        Select::new(self, table, "*")
    }

    /// `SELECT columns FROM table`
    fn select_columns(&self, table: &str, columns: &str) -> Select<'_, Self> {
        Select::new(self, table, columns)
    }

    /// `UPDATE table`
    fn update(&self, table: &str) -> Update<'_, Self> {
        Update::new(self, table)
    }

    /// `DELETE FROM table`
    fn delete(&self, table: &str) -> Delete<'_, Self> {
        Delete::new(self, table)
    }
}

impl<D: Driver> Builders for D {}

/// WHERE clause calls shared by SELECT, UPDATE and DELETE.
///
/// The plain forms use the pattern `{cam} {rel} {val}`; the `_with` forms
/// take any pattern, e.g. `"{cam} BETWEEN {val} AND {val}"`.
pub trait Conditional: Sized {
    /// The builder's WHERE clause.
    fn where_clause_mut(&mut self) -> &mut Clause;

    /// Start the WHERE clause.
    fn where_(self, field: &str, operator: &str, value: impl ToValue) -> Result<Self> {
        self.where_with(field, operator, value, Pattern::condition())
    }

    /// Add a condition joined with AND.
    fn where_and(self, field: &str, operator: &str, value: impl ToValue) -> Result<Self> {
        self.where_and_with(field, operator, value, Pattern::condition())
    }

    /// Add a condition joined with OR.
    fn where_or(self, field: &str, operator: &str, value: impl ToValue) -> Result<Self> {
        self.where_or_with(field, operator, value, Pattern::condition())
    }

    fn where_with(
        self,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        push_where(self, Connector::Initial, field, operator, value, pattern)
    }

    fn where_and_with(
        self,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        push_where(self, Connector::And, field, operator, value, pattern)
    }

    fn where_or_with(
        self,
        field: &str,
        operator: &str,
        value: impl ToValue,
        pattern: impl Into<Pattern>,
    ) -> Result<Self> {
        push_where(self, Connector::Or, field, operator, value, pattern)
    }
}

fn push_where<B: Conditional>(
    mut builder: B,
    connector: Connector,
    field: &str,
    operator: &str,
    value: impl ToValue,
    pattern: impl Into<Pattern>,
) -> Result<B> {
    builder.where_clause_mut().chain(
        connector,
        field,
        operator,
        value.to_value(),
        &pattern.into(),
    )?;
    Ok(builder)
}

/// Join non-empty SQL segments with single spaces.
pub(crate) fn assemble<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
