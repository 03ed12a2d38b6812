//! Connection settings

use std::fmt;
use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::error::{Error, Result};

/// Server dialect a configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Mysql,
    Sqlsrv,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Mysql => f.write_str("mysql"),
            Dialect::Sqlsrv => f.write_str("sqlsrv"),
        }
    }
}

/// Where and how to connect.
///
/// `port`, `user` and `password` fall back to per-dialect defaults when
/// left unset: MySQL connects as `root` with an empty password, SQL Server
/// has no default credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub kind: Dialect,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}
fn default_database() -> String {
    defaults::DATABASE.to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            kind: Dialect::default(),
            host: default_host(),
            port: None,
            database: default_database(),
            user: None,
            password: None,
        }
    }
}

impl ConnectionConfig {
    /// A MySQL configuration for `database` with every other field defaulted.
    pub fn mysql(database: &str) -> Self {
        Self {
            database: database.to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration using config-rs: the given file (or an optional
    /// `qbind.*` in the working directory), then `QBIND_*` environment
    /// variables on top.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_NAME).required(false));
        }

        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX).try_parsing(true));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Configuration("host is required".into()));
        }
        if self.database.trim().is_empty() {
            return Err(Error::Configuration("database is required".into()));
        }
        if self.port == Some(0) {
            return Err(Error::Configuration("port must be non-zero".into()));
        }
        Ok(())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(match self.kind {
            Dialect::Mysql => defaults::MYSQL_PORT,
            Dialect::Sqlsrv => defaults::SQLSRV_PORT,
        })
    }

    pub fn user(&self) -> Option<&str> {
        match (&self.user, self.kind) {
            (Some(user), _) => Some(user),
            (None, Dialect::Mysql) => Some(defaults::MYSQL_USER),
            (None, Dialect::Sqlsrv) => None,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match (&self.password, self.kind) {
            (Some(password), _) => Some(password),
            (None, Dialect::Mysql) => Some(defaults::MYSQL_PASSWORD),
            (None, Dialect::Sqlsrv) => None,
        }
    }

    /// Connection options for mysql_async.
    ///
    /// Fails for any dialect other than MySQL.
    pub fn mysql_opts(&self) -> Result<mysql_async::Opts> {
        if self.kind != Dialect::Mysql {
            return Err(Error::Configuration(format!(
                "no driver available for '{}' connections",
                self.kind
            )));
        }
        self.validate()?;

        let builder = mysql_async::OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port())
            .db_name(Some(self.database.clone()))
            .user(self.user().map(str::to_string))
            .pass(self.password().map(str::to_string));
        Ok(builder.into())
    }
}
