//! MySQL driver

mod connection;
mod types;

pub use connection::{MySqlConnection, MySqlStatement};
