//! `Assignments` table persistence.
//!
//! # Invariants
//! - Inserting an existing `(EmployeeID, ProjectID)` pair is rejected by the
//!   primary key; there is no upsert path. Role/salary changes go through
//!   `update`.

use super::{EntityStore, RepoResult};
use crate::model::assignment::{Assignment, AssignmentKey};
use rusqlite::{params, Connection, Row};

/// SQLite-backed assignment table keyed by `(EmployeeID, ProjectID)`.
pub struct AssignmentStore;

impl EntityStore for AssignmentStore {
    type Record = Assignment;
    type Key = AssignmentKey;

    const ENTITY: &'static str = "assignment";

    fn list_all(conn: &Connection) -> RepoResult<Vec<Assignment>> {
        let mut stmt = conn.prepare(
            "SELECT EmployeeID, ProjectID, Role, Salary
             FROM Assignments
             ORDER BY EmployeeID, ProjectID;",
        )?;
        let assignments = stmt
            .query_map([], parse_assignment_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assignments)
    }

    fn insert(conn: &Connection, assignment: &Assignment) -> RepoResult<AssignmentKey> {
        assignment.validate()?;

        conn.execute(
            "INSERT INTO Assignments (EmployeeID, ProjectID, Role, Salary)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                assignment.employee_id,
                assignment.project_id,
                assignment.role.as_str(),
                assignment.salary,
            ],
        )?;
        Ok(assignment.key())
    }

    /// Only role and salary are mutable; the key columns never change.
    fn update(
        conn: &Connection,
        key: AssignmentKey,
        assignment: &Assignment,
    ) -> RepoResult<usize> {
        assignment.validate()?;

        let changed = conn.execute(
            "UPDATE Assignments
             SET
                Role = ?1,
                Salary = ?2
             WHERE EmployeeID = ?3 AND ProjectID = ?4;",
            params![
                assignment.role.as_str(),
                assignment.salary,
                key.employee_id,
                key.project_id,
            ],
        )?;
        Ok(changed)
    }

    fn delete(conn: &Connection, key: AssignmentKey) -> RepoResult<usize> {
        let removed = conn.execute(
            "DELETE FROM Assignments WHERE EmployeeID = ?1 AND ProjectID = ?2;",
            params![key.employee_id, key.project_id],
        )?;
        Ok(removed)
    }
}

fn parse_assignment_row(row: &Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        employee_id: row.get("EmployeeID")?,
        project_id: row.get("ProjectID")?,
        role: row.get("Role")?,
        salary: row.get("Salary")?,
    })
}
