//! Employee record.

use super::{display_id, require_text, DepartmentId, EmployeeId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One row of `Employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// `None` lets the store assign the next identifier.
    pub id: Option<EmployeeId>,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub department_id: Option<DepartmentId>,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        department_id: Option<DepartmentId>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            date_of_birth,
            department_id,
        }
    }

    /// Creates an employee with a caller-supplied identifier.
    pub fn with_id(
        id: EmployeeId,
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        department_id: Option<DepartmentId>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, date_of_birth, department_id)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("employee name", &self.name)
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Employee({}, {})", display_id(self.id), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Employee;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    }

    #[test]
    fn display_shows_id_and_name() {
        assert_eq!(
            Employee::with_id(7, "Ana", dob(), None).to_string(),
            "Employee(7, Ana)"
        );
        assert_eq!(Employee::new("Bo", dob(), Some(1)).to_string(), "Employee(new, Bo)");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Employee::new("  ", dob(), None).validate().unwrap_err();
        assert_eq!(err, ValidationError::BlankField("employee name"));
    }
}
