//! `Departments` table persistence.

use super::{EntityStore, RepoResult};
use crate::model::department::Department;
use crate::model::DepartmentId;
use rusqlite::{params, Connection, Row};

/// SQLite-backed department table.
pub struct DepartmentStore;

impl EntityStore for DepartmentStore {
    type Record = Department;
    type Key = DepartmentId;

    const ENTITY: &'static str = "department";

    fn list_all(conn: &Connection) -> RepoResult<Vec<Department>> {
        let mut stmt = conn.prepare(
            "SELECT DepartmentID, DepartmentName
             FROM Departments
             ORDER BY DepartmentID;",
        )?;
        let departments = stmt
            .query_map([], parse_department_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn insert(conn: &Connection, department: &Department) -> RepoResult<DepartmentId> {
        department.validate()?;

        conn.execute(
            "INSERT INTO Departments (DepartmentID, DepartmentName) VALUES (?1, ?2);",
            params![department.id, department.name.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(conn: &Connection, id: DepartmentId, department: &Department) -> RepoResult<usize> {
        department.validate()?;

        let changed = conn.execute(
            "UPDATE Departments SET DepartmentName = ?1 WHERE DepartmentID = ?2;",
            params![department.name.as_str(), id],
        )?;
        Ok(changed)
    }

    fn delete(conn: &Connection, id: DepartmentId) -> RepoResult<usize> {
        let removed = conn.execute("DELETE FROM Departments WHERE DepartmentID = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: Some(row.get("DepartmentID")?),
        name: row.get("DepartmentName")?,
    })
}
