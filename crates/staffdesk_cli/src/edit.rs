//! Write commands: create, update and delete one row through the entity
//! services.
//!
//! A no-match update/delete is reported, not treated as a failure; store
//! rejections surface as the service's diagnostic.

use crate::cli::{
    AssignmentFields, CreateRecord, DeleteTarget, DepartmentFields, EmployeeFields, ProjectFields,
    UpdateRecord,
};
use staffdesk_core::{
    Assignment, AssignmentKey, Department, DepartmentId, Employee, EmployeeId, Project, ProjectId,
    ServiceResult, Staffdesk,
};
use std::fmt::Display;

pub fn create(desk: &Staffdesk, record: CreateRecord) -> ServiceResult<String> {
    let message = match record {
        CreateRecord::Employee { id, fields } => {
            let key = desk.employees.create(&employee(id, fields))?;
            format!("created employee {key}")
        }
        CreateRecord::Department { id, fields } => {
            let key = desk.departments.create(&department(id, fields))?;
            format!("created department {key}")
        }
        CreateRecord::Project { id, fields } => {
            let key = desk.projects.create(&project(id, fields))?;
            format!("created project {key}")
        }
        CreateRecord::Assignment(fields) => {
            let key = desk.assignments.create(&assignment(fields))?;
            format!("created assignment {key}")
        }
    };
    Ok(message)
}

pub fn update(desk: &Staffdesk, record: UpdateRecord) -> ServiceResult<String> {
    let message = match record {
        UpdateRecord::Employee { id, fields } => outcome(
            "updated",
            "employee",
            id,
            desk.employees.update(id, &employee(Some(id), fields))?,
        ),
        UpdateRecord::Department { id, fields } => outcome(
            "updated",
            "department",
            id,
            desk.departments.update(id, &department(Some(id), fields))?,
        ),
        UpdateRecord::Project { id, fields } => outcome(
            "updated",
            "project",
            id,
            desk.projects.update(id, &project(Some(id), fields))?,
        ),
        UpdateRecord::Assignment(fields) => {
            let record = assignment(fields);
            let key = record.key();
            outcome(
                "updated",
                "assignment",
                key,
                desk.assignments.update(key, &record)?,
            )
        }
    };
    Ok(message)
}

pub fn delete(desk: &Staffdesk, target: DeleteTarget) -> ServiceResult<String> {
    let message = match target {
        DeleteTarget::Employee { id } => {
            outcome("deleted", "employee", id, desk.employees.delete(id)?)
        }
        DeleteTarget::Department { id } => {
            outcome("deleted", "department", id, desk.departments.delete(id)?)
        }
        DeleteTarget::Project { id } => {
            outcome("deleted", "project", id, desk.projects.delete(id)?)
        }
        DeleteTarget::Assignment { employee, project } => {
            let key = AssignmentKey::new(employee, project);
            outcome("deleted", "assignment", key, desk.assignments.delete(key)?)
        }
    };
    Ok(message)
}

fn outcome(verb: &str, entity: &str, key: impl Display, affected: bool) -> String {
    if affected {
        format!("{verb} {entity} {key}")
    } else {
        format!("no {entity} {key}; nothing {verb}")
    }
}

fn employee(id: Option<EmployeeId>, fields: EmployeeFields) -> Employee {
    Employee {
        id,
        name: fields.name,
        date_of_birth: fields.dob,
        department_id: fields.department,
    }
}

fn department(id: Option<DepartmentId>, fields: DepartmentFields) -> Department {
    Department {
        id,
        name: fields.name,
    }
}

fn project(id: Option<ProjectId>, fields: ProjectFields) -> Project {
    Project {
        id,
        name: fields.name,
        manager_id: fields.manager,
    }
}

fn assignment(fields: AssignmentFields) -> Assignment {
    Assignment::new(fields.employee, fields.project, fields.role, fields.salary)
}

#[cfg(test)]
mod tests {
    use super::{create, delete, update};
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use staffdesk_core::{ErrorKind, Staffdesk, StoreConfig};
    use tempfile::TempDir;

    fn desk() -> (TempDir, Staffdesk) {
        let dir = tempfile::tempdir().unwrap();
        let desk = Staffdesk::new(StoreConfig::new(dir.path().join("cli.db")));
        (dir, desk)
    }

    fn run(desk: &Staffdesk, args: &[&str]) -> staffdesk_core::ServiceResult<String> {
        let argv = std::iter::once("staffdesk").chain(args.iter().copied());
        match Cli::try_parse_from(argv).expect("cli should parse").command {
            Commands::Create { record } => create(desk, record),
            Commands::Update { record } => update(desk, record),
            Commands::Delete { target } => delete(desk, target),
            other => panic!("not a write command: {other:?}"),
        }
    }

    #[test]
    fn create_update_delete_round_through_services() {
        let (_dir, desk) = desk();

        assert_eq!(
            run(&desk, &["create", "department", "--id", "1", "--name", "Eng"]).unwrap(),
            "created department 1"
        );
        assert_eq!(
            run(
                &desk,
                &["create", "employee", "--name", "Ana", "--dob", "1990-03-14", "--department", "1"]
            )
            .unwrap(),
            "created employee 1"
        );
        assert_eq!(
            run(&desk, &["create", "project", "--name", "X", "--manager", "1"]).unwrap(),
            "created project 1"
        );
        assert_eq!(
            run(
                &desk,
                &["create", "assignment", "--employee", "1", "--project", "1", "--role", "Dev", "--salary", "50"]
            )
            .unwrap(),
            "created assignment 1/1"
        );

        assert_eq!(
            run(
                &desk,
                &["update", "assignment", "--employee", "1", "--project", "1", "--role", "Lead", "--salary", "90"]
            )
            .unwrap(),
            "updated assignment 1/1"
        );
        let assignments = desk.assignments.list().unwrap();
        assert_eq!(assignments[0].role, "Lead");
        assert_eq!(assignments[0].salary, 90.0);

        assert_eq!(
            run(&desk, &["update", "department", "--id", "1", "--name", "Engineering"]).unwrap(),
            "updated department 1"
        );
        assert_eq!(desk.departments.list().unwrap()[0].name, "Engineering");

        assert_eq!(
            run(&desk, &["delete", "assignment", "--employee", "1", "--project", "1"]).unwrap(),
            "deleted assignment 1/1"
        );
        assert!(desk.assignments.list().unwrap().is_empty());
    }

    #[test]
    fn missing_rows_are_reported_without_error() {
        let (_dir, desk) = desk();
        assert_eq!(
            run(&desk, &["delete", "project", "--id", "9"]).unwrap(),
            "no project 9; nothing deleted"
        );
        assert_eq!(
            run(&desk, &["update", "department", "--id", "9", "--name", "Ops"]).unwrap(),
            "no department 9; nothing updated"
        );
    }

    #[test]
    fn store_rejections_carry_the_service_diagnostic() {
        let (_dir, desk) = desk();
        run(&desk, &["create", "department", "--id", "1", "--name", "Eng"]).unwrap();
        run(
            &desk,
            &["create", "employee", "--name", "Ana", "--dob", "1990-03-14", "--department", "1"],
        )
        .unwrap();

        let duplicate = run(&desk, &["create", "department", "--name", "Eng"]).unwrap_err();
        assert_eq!(duplicate.kind(), ErrorKind::ConstraintViolation);
        assert!(duplicate.to_string().contains("already exists"));

        let referenced = run(&desk, &["delete", "department", "--id", "1"]).unwrap_err();
        assert!(referenced.to_string().contains("still reference"));
        assert_eq!(desk.departments.list().unwrap().len(), 1);
    }
}
