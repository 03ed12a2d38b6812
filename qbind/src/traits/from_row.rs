//! FromRow trait for mapping fetched rows to Rust structs

use crate::error::Result;
use crate::row::Row;

/// Trait for types that can be constructed from a fetched row.
///
/// Used by [`Select::fetch_as`](crate::Select::fetch_as).
///
/// ```ignore
/// use qbind::{FromRow, Row, Result};
///
/// pub struct User {
///     pub id: i64,
///     pub username: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> Result<Self> {
///         Ok(Self {
///             id: row.get("id")?,
///             username: row.get("username")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Construct an instance of this type from a database row.
    fn from_row(row: &Row) -> Result<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(row.clone())
    }
}
