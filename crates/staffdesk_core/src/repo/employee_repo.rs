//! `Employees` table persistence.

use super::{EntityStore, RepoResult};
use crate::model::employee::Employee;
use crate::model::EmployeeId;
use rusqlite::{params, Connection, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    EmployeeID,
    Name,
    DateOfBirth,
    DepartmentID
FROM Employees";

/// SQLite-backed employee table.
pub struct EmployeeStore;

impl EntityStore for EmployeeStore {
    type Record = Employee;
    type Key = EmployeeId;

    const ENTITY: &'static str = "employee";

    fn list_all(conn: &Connection) -> RepoResult<Vec<Employee>> {
        let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY EmployeeID;"))?;
        let employees = stmt
            .query_map([], parse_employee_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    fn insert(conn: &Connection, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        // A NULL EmployeeID makes SQLite assign the next rowid.
        conn.execute(
            "INSERT INTO Employees (EmployeeID, Name, DateOfBirth, DepartmentID)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                employee.id,
                employee.name.as_str(),
                employee.date_of_birth,
                employee.department_id,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(conn: &Connection, id: EmployeeId, employee: &Employee) -> RepoResult<usize> {
        employee.validate()?;

        let changed = conn.execute(
            "UPDATE Employees
             SET
                Name = ?1,
                DateOfBirth = ?2,
                DepartmentID = ?3
             WHERE EmployeeID = ?4;",
            params![
                employee.name.as_str(),
                employee.date_of_birth,
                employee.department_id,
                id,
            ],
        )?;
        Ok(changed)
    }

    fn delete(conn: &Connection, id: EmployeeId) -> RepoResult<usize> {
        let removed = conn.execute("DELETE FROM Employees WHERE EmployeeID = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: Some(row.get("EmployeeID")?),
        name: row.get("Name")?,
        date_of_birth: row.get("DateOfBirth")?,
        department_id: row.get("DepartmentID")?,
    })
}
