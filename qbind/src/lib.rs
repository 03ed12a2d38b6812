//! qbind - parameterized SQL statement builder
//!
//! Fluent builders for INSERT, SELECT, UPDATE and DELETE that assemble SQL
//! text with positional `?` placeholders and keep an ordered ledger of the
//! values to bind, so the two can never drift apart. Statements run against
//! any [`Driver`]; a MySQL driver on `mysql_async` is included.
//!
//! # Features
//!
//! - **Patterns**: `{cam}` / `{rel}` / `{val}` templates such as
//!   `"{cam} BETWEEN {val} AND {val}"`, one bound value per `{val}`
//! - **Checked clause order**: chaining AND/OR onto an empty WHERE or HAVING
//!   is an error, not broken SQL
//! - **LIKE wrapping**: values compared with `LIKE` are bound as `%value%`
//! - **Row mapping**: read columns by name through [`FromValue`] or map whole
//!   rows through [`FromRow`]
//!
//! # Example
//!
//! ```ignore
//! use qbind::{Builders, Conditional, ConnectionConfig, MySqlConnection};
//!
//! let conn = MySqlConnection::connect(&ConnectionConfig::mysql("shop")).await?;
//!
//! conn.insert("users", "name, age").value("Alice").value(30).execute().await?;
//!
//! let adults = conn
//!     .select("users")
//!     .where_("age", ">", 18)?
//!     .where_or("vip", "=", true)?
//!     .orderby("name")
//!     .execute()
//!     .await?;
//! ```

pub mod builder;
pub mod clause;
pub mod config;
pub mod error;
pub mod fragment;
pub mod ledger;
pub mod mysql;
pub mod pattern;
pub mod row;
pub mod statement;
pub mod traits;
pub mod value;

#[cfg(test)]
mod testing;

pub use builder::{Builders, Conditional, Delete, Insert, Select, Update};
pub use clause::{Clause, ClauseKind, ClauseState, Connector};
pub use config::{ConnectionConfig, Dialect};
pub use error::{Error, Result};
pub use fragment::ValueList;
pub use ledger::BindLedger;
pub use mysql::{MySqlConnection, MySqlStatement};
pub use pattern::{Expansion, Pattern, Token};
pub use row::Row;
pub use statement::Statement;
pub use traits::{BoundParams, Driver, ExecuteResult, FromRow, FromValue, ToValue};
pub use value::Value;
