//! Error types for qbind

use thiserror::Error;

/// Result type alias for qbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or executing statements
#[derive(Error, Debug)]
pub enum Error {
    /// MySQL driver error (prepare, bind, execute or connection failure)
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },

    /// Column not found in row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Null value for non-optional field
    #[error("Unexpected null value for column: {0}")]
    UnexpectedNull(String),

    /// A clause call was made in an order that would produce invalid SQL
    #[error("Call order error: {call} on {clause}: {reason}")]
    CallOrder {
        clause: &'static str,
        call: &'static str,
        reason: &'static str,
    },

    /// A statement was finalized without a required part
    #[error("Incomplete statement: {0}")]
    Incomplete(&'static str),

    /// A positional parameter could not be bound
    #[error("Cannot bind parameter {position}: {reason}")]
    Bind { position: usize, reason: String },

    /// Invalid connection configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(String),

    /// IO error (reading configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
