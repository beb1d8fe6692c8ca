//! Repository layer: one table per store, all SQL lives here.
//!
//! # Responsibility
//! - Define the uniform CRUD contract shared by every entity table.
//! - Map store rows to entity records and back.
//!
//! # Invariants
//! - Every statement is parameterized; no value is interpolated into SQL.
//! - Write paths call the record's `validate()` before any SQL runs.
//! - Repositories borrow a connection; they never open, commit or close one.

use crate::model::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment_repo;
pub mod department_repo;
pub mod employee_repo;
pub mod project_repo;

pub use assignment_repo::AssignmentStore;
pub use department_repo::DepartmentStore;
pub use employee_repo::EmployeeStore;
pub use project_repo::ProjectStore;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Sqlite(rusqlite::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// CRUD contract for one entity table.
///
/// Implementations are stateless; the caller supplies the connection (or a
/// transaction, which derefs to one) and owns its lifecycle.
pub trait EntityStore {
    type Record;
    type Key: Copy + Display;

    /// Entity label used in diagnostics and log lines.
    const ENTITY: &'static str;

    /// All rows, ordered by primary key.
    fn list_all(conn: &Connection) -> RepoResult<Vec<Self::Record>>;

    /// Inserts one row and returns the key actually stored.
    fn insert(conn: &Connection, record: &Self::Record) -> RepoResult<Self::Key>;

    /// Overwrites every mutable field of the row at `key`.
    ///
    /// Returns the number of rows matched.
    fn update(conn: &Connection, key: Self::Key, record: &Self::Record) -> RepoResult<usize>;

    /// Removes the row at `key`; returns the number of rows removed.
    fn delete(conn: &Connection, key: Self::Key) -> RepoResult<usize>;
}
