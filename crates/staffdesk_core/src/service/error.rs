//! Caller-facing error type for entity services and reports.
//!
//! # Responsibility
//! - Classify store failures into connectivity, constraint and statement
//!   failures.
//! - Produce the human-readable diagnostic shown next to a failed call.
//!
//! # Invariants
//! - Constraint classification uses SQLite's extended result code only.
//! - Every variant maps to exactly one `ErrorKind` and one `error_code()`.

use crate::db::DbError;
use crate::model::ValidationError;
use crate::repo::RepoError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    Report,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Report => "report",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store rule that rejected a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `target` is the `Table.Column` list reported by SQLite.
    Unique { target: String },
    PrimaryKey { target: String },
    ForeignKey,
    NotNull { target: String },
    Check { target: String },
    Other { extended_code: i32 },
}

impl Constraint {
    /// Classifies a SQLite error; `None` when it is not a constraint failure.
    pub fn from_sqlite(err: &rusqlite::Error) -> Option<Self> {
        let rusqlite::Error::SqliteFailure(failure, message) = err else {
            return None;
        };
        if failure.code != rusqlite::ErrorCode::ConstraintViolation {
            return None;
        }

        let target = message
            .as_deref()
            .and_then(|text| text.split_once(": "))
            .map(|(_, target)| target.to_string())
            .unwrap_or_default();

        let constraint = match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => Self::Unique { target },
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Self::PrimaryKey { target },
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
            ffi::SQLITE_CONSTRAINT_NOTNULL => Self::NotNull { target },
            ffi::SQLITE_CONSTRAINT_CHECK => Self::Check { target },
            other => Self::Other {
                extended_code: other,
            },
        };
        Some(constraint)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unique { .. } => "constraint_unique",
            Self::PrimaryKey { .. } => "constraint_primary_key",
            Self::ForeignKey => "constraint_foreign_key",
            Self::NotNull { .. } => "constraint_not_null",
            Self::Check { .. } => "constraint_check",
            Self::Other { .. } => "constraint_other",
        }
    }
}

/// Coarse failure taxonomy for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    ConstraintViolation,
    StatementFailure,
    InvalidRecord,
}

#[derive(Debug)]
pub enum ServiceError {
    /// No usable connection could be opened.
    Connectivity(DbError),
    ConstraintViolation {
        entity: &'static str,
        operation: Operation,
        constraint: Constraint,
    },
    /// Any other store-reported failure.
    Statement {
        entity: &'static str,
        operation: Operation,
        source: rusqlite::Error,
    },
    /// The record failed field checks; nothing was sent to the store.
    InvalidRecord {
        entity: &'static str,
        source: ValidationError,
    },
}

impl ServiceError {
    pub(crate) fn from_repo(entity: &'static str, operation: Operation, err: RepoError) -> Self {
        match err {
            RepoError::Validation(source) => Self::InvalidRecord { entity, source },
            RepoError::Sqlite(source) => Self::from_sqlite(entity, operation, source),
        }
    }

    pub(crate) fn from_sqlite(
        entity: &'static str,
        operation: Operation,
        source: rusqlite::Error,
    ) -> Self {
        match Constraint::from_sqlite(&source) {
            Some(constraint) => Self::ConstraintViolation {
                entity,
                operation,
                constraint,
            },
            None => Self::Statement {
                entity,
                operation,
                source,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connectivity(_) => ErrorKind::Connectivity,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::Statement { .. } => ErrorKind::StatementFailure,
            Self::InvalidRecord { .. } => ErrorKind::InvalidRecord,
        }
    }

    /// Stable snake_case code used in log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connectivity(err) => err.error_code(),
            Self::ConstraintViolation { constraint, .. } => constraint.error_code(),
            Self::Statement { .. } => "statement_failed",
            Self::InvalidRecord { .. } => "invalid_record",
        }
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            Self::ConstraintViolation { constraint, .. } => Some(constraint),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connectivity(err) => write!(f, "cannot connect to the database: {err}"),
            Self::ConstraintViolation {
                entity,
                operation,
                constraint,
            } => {
                write!(f, "{entity} {operation} rejected: ")?;
                match (constraint, operation) {
                    (Constraint::Unique { target }, _) => {
                        write!(f, "a row with the same {target} already exists")
                    }
                    (Constraint::PrimaryKey { target }, _) => {
                        write!(f, "a row with the same key ({target}) already exists")
                    }
                    (Constraint::ForeignKey, Operation::Delete) => {
                        write!(f, "other rows still reference it")
                    }
                    (Constraint::ForeignKey, _) => write!(f, "a referenced row does not exist"),
                    (Constraint::NotNull { target }, _) => write!(f, "{target} is required"),
                    (Constraint::Check { target }, _) => {
                        write!(f, "check constraint {target} failed")
                    }
                    (Constraint::Other { extended_code }, _) => {
                        write!(f, "constraint violation (sqlite code {extended_code})")
                    }
                }
            }
            Self::Statement {
                entity,
                operation,
                source,
            } => write!(f, "{entity} {operation} failed: {source}"),
            Self::InvalidRecord { entity, source } => write!(f, "invalid {entity}: {source}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connectivity(err) => Some(err),
            Self::ConstraintViolation { .. } => None,
            Self::Statement { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Connectivity(value)
    }
}
