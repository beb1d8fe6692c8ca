//! SQLite storage bootstrap, schema migrations and the connection provider.
//!
//! # Responsibility
//! - Open and configure SQLite connections for staffdesk.
//! - Apply schema migrations in deterministic order.
//! - Hand out one scoped connection per service call.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Every connection handed out has `foreign_keys=ON`.
//! - Core code must not read/write application data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;
mod provider;

pub use open::{open_db, open_db_in_memory};
pub use provider::{ConnectionProvider, ScopedConnection, StoreInfo};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to obtain a usable store handle.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Configuration was rejected before any connection attempt.
    InvalidConfig(String),
    /// The database file does not exist and creation is disabled.
    MissingDatabase(PathBuf),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Stable snake_case code used in log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "db_open_failed",
            Self::InvalidConfig(_) => "db_config_invalid",
            Self::MissingDatabase(_) => "db_missing",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_unsupported",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidConfig(message) => write!(f, "invalid store configuration: {message}"),
            Self::MissingDatabase(path) => {
                write!(f, "database file `{}` does not exist", path.display())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::InvalidConfig(_)
            | Self::MissingDatabase(_)
            | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
