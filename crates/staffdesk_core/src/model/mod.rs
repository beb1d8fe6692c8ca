//! Entity records for the staffdesk schema.
//!
//! # Responsibility
//! - Define the plain data holders mapped to/from store rows.
//! - Provide record-level field checks run before every write.
//!
//! # Invariants
//! - Records carry no behavior beyond construction, display and validation.
//! - Referential rules are enforced by the store, not here.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment;
pub mod department;
pub mod employee;
pub mod project;

pub type EmployeeId = i64;
pub type DepartmentId = i64;
pub type ProjectId = i64;

/// Field-level rejection raised before a record reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    BlankField(&'static str),
    /// Salary is negative, NaN or infinite.
    InvalidSalary(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidSalary(value) => {
                write!(f, "salary must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "new".to_string(), |id| id.to_string())
}
