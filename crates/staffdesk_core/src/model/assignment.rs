//! Assignment record: the employee/project link.
//!
//! # Invariants
//! - Identity is the `(employee_id, project_id)` pair; at most one row exists
//!   per pair.
//! - `salary` is finite and `>= 0`.

use super::{require_text, EmployeeId, ProjectId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Composite key of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
}

impl AssignmentKey {
    pub fn new(employee_id: EmployeeId, project_id: ProjectId) -> Self {
        Self {
            employee_id,
            project_id,
        }
    }
}

impl Display for AssignmentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.employee_id, self.project_id)
    }
}

/// One row of `Assignments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub role: String,
    pub salary: f64,
}

impl Assignment {
    pub fn new(
        employee_id: EmployeeId,
        project_id: ProjectId,
        role: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            employee_id,
            project_id,
            role: role.into(),
            salary,
        }
    }

    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.employee_id, self.project_id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("assignment role", &self.role)?;
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(ValidationError::InvalidSalary(self.salary));
        }
        Ok(())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Assignment({}, {}, {})",
            self.employee_id, self.project_id, self.role
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;
    use crate::model::ValidationError;

    #[test]
    fn negative_or_non_finite_salary_is_rejected() {
        for salary in [-0.01, f64::NAN, f64::INFINITY] {
            let err = Assignment::new(1, 1, "Lead", salary).validate().unwrap_err();
            assert!(matches!(err, ValidationError::InvalidSalary(_)));
        }
    }

    #[test]
    fn zero_salary_is_allowed() {
        Assignment::new(1, 1, "Intern", 0.0).validate().unwrap();
    }

    #[test]
    fn blank_role_is_rejected() {
        let err = Assignment::new(1, 1, "", 10.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::BlankField("assignment role"));
    }

    #[test]
    fn key_and_display_use_both_ids() {
        let assignment = Assignment::new(3, 9, "Dev", 50.0);
        assert_eq!(assignment.key().to_string(), "3/9");
        assert_eq!(assignment.to_string(), "Assignment(3, 9, Dev)");
    }
}
