//! Default connection values

/// Default server host
pub const HOST: &str = "localhost";

/// Default database name
pub const DATABASE: &str = "test";

/// Default MySQL port
pub const MYSQL_PORT: u16 = 3306;

/// Default SQL Server port
pub const SQLSRV_PORT: u16 = 1433;

/// Default MySQL user
pub const MYSQL_USER: &str = "root";

/// Default MySQL password (empty)
pub const MYSQL_PASSWORD: &str = "";

/// File name (without extension) looked up by `ConnectionConfig::load`
pub const CONFIG_NAME: &str = "qbind";

/// Prefix for environment overrides, e.g. `QBIND_HOST`
pub const ENV_PREFIX: &str = "QBIND";
