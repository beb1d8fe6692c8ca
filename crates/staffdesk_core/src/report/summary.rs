//! Dashboard figures: table sizes, salary average, top earners.

use crate::model::EmployeeId;
use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub employees: i64,
    pub departments: i64,
    pub projects: i64,
    pub assignments: i64,
    /// Mean of all assignment salaries; `None` with no assignments.
    pub average_salary: Option<f64>,
    /// Highest average assignment salary first.
    pub top_earners: Vec<EmployeeAverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeAverage {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub average_salary: f64,
}

pub(super) fn load(conn: &Connection, top_n: u32) -> rusqlite::Result<DashboardSummary> {
    let (employees, departments, projects, assignments, average_salary) = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM Employees),
            (SELECT COUNT(*) FROM Departments),
            (SELECT COUNT(*) FROM Projects),
            (SELECT COUNT(*) FROM Assignments),
            (SELECT AVG(Salary) FROM Assignments);",
        [],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, Option<f64>>(4)?,
            ))
        },
    )?;

    let mut stmt = conn.prepare(
        "SELECT
            a.EmployeeID,
            e.Name,
            AVG(a.Salary) AS AverageSalary
         FROM Assignments a
         INNER JOIN Employees e ON a.EmployeeID = e.EmployeeID
         GROUP BY a.EmployeeID, e.Name
         ORDER BY AverageSalary DESC, a.EmployeeID
         LIMIT ?1;",
    )?;
    let top_earners = stmt
        .query_map(params![i64::from(top_n)], |row| {
            Ok(EmployeeAverage {
                employee_id: row.get(0)?,
                employee_name: row.get(1)?,
                average_salary: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DashboardSummary {
        employees,
        departments,
        projects,
        assignments,
        average_salary,
        top_earners,
    })
}
