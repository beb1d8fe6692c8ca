//! Project record.

use super::{display_id, require_text, EmployeeId, ProjectId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One row of `Projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<ProjectId>,
    pub name: String,
    /// Managing employee; cleared by the store when that employee is deleted.
    pub manager_id: Option<EmployeeId>,
}

impl Project {
    pub fn new(name: impl Into<String>, manager_id: Option<EmployeeId>) -> Self {
        Self {
            id: None,
            name: name.into(),
            manager_id,
        }
    }

    pub fn with_id(id: ProjectId, name: impl Into<String>, manager_id: Option<EmployeeId>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, manager_id)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("project name", &self.name)
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Project({}, {})", display_id(self.id), self.name)
    }
}
