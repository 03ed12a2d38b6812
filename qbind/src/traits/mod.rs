//! Core traits for qbind

mod driver;
mod from_row;
mod from_value;
mod to_value;

pub use driver::{BoundParams, Driver, ExecuteResult};
pub use from_row::FromRow;
pub use from_value::FromValue;
pub use to_value::ToValue;
