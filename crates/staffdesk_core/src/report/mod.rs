//! Read-only reporting over the staffdesk schema.
//!
//! # Responsibility
//! - Run the fixed join/aggregation reports and return them as `Table`s.
//! - Produce the dashboard summary.
//!
//! # Invariants
//! - No report mutates state.
//! - Each call opens its own connection and releases it before returning.
//! - Column names are exactly the SQL aliases below.

use crate::db::ConnectionProvider;
use crate::logging::sanitize_message;
use crate::service::error::{Operation, ServiceError, ServiceResult};
use log::{error, info};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Instant;

mod summary;
mod table;

pub use summary::{DashboardSummary, EmployeeAverage};
pub use table::{Cell, Table};

/// The named reports offered to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    /// Every employee with department name; employees without a department
    /// keep NULL department fields.
    Employees,
    /// Every project with manager name (outer join).
    Projects,
    /// Assignments with employee and project names (inner joins).
    Assignments,
    /// Employees on at least one project, one row per assignment.
    ProjectParticipants,
    /// Every employee with optional department/assignment/project data.
    EmployeeOverview,
    /// Assignments with employee, project and (nullable) manager name.
    AssignmentsWithManager,
    /// Employees whose average assignment salary beats the global average.
    AboveGlobalAverage,
}

impl Report {
    pub const ALL: [Report; 7] = [
        Report::Employees,
        Report::Projects,
        Report::Assignments,
        Report::ProjectParticipants,
        Report::EmployeeOverview,
        Report::AssignmentsWithManager,
        Report::AboveGlobalAverage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Projects => "projects",
            Self::Assignments => "assignments",
            Self::ProjectParticipants => "project-participants",
            Self::EmployeeOverview => "employee-overview",
            Self::AssignmentsWithManager => "assignments-with-manager",
            Self::AboveGlobalAverage => "above-global-average",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Self::Employees => EMPLOYEES_SQL,
            Self::Projects => PROJECTS_SQL,
            Self::Assignments => ASSIGNMENTS_SQL,
            Self::ProjectParticipants => PROJECT_PARTICIPANTS_SQL,
            Self::EmployeeOverview => EMPLOYEE_OVERVIEW_SQL,
            Self::AssignmentsWithManager => ASSIGNMENTS_WITH_MANAGER_SQL,
            Self::AboveGlobalAverage => ABOVE_GLOBAL_AVERAGE_SQL,
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Report {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|report| report.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|report| report.name()).collect();
                format!("unknown report `{value}`; expected one of {}", known.join("|"))
            })
    }
}

const EMPLOYEES_SQL: &str = "SELECT
    e.EmployeeID,
    e.Name,
    e.DateOfBirth,
    e.DepartmentID,
    d.DepartmentName
FROM Employees e
LEFT JOIN Departments d ON e.DepartmentID = d.DepartmentID
ORDER BY e.EmployeeID;";

const PROJECTS_SQL: &str = "SELECT
    p.ProjectID,
    p.ProjectName,
    p.ManagerEmployeeID,
    e.Name AS ManagerName
FROM Projects p
LEFT JOIN Employees e ON p.ManagerEmployeeID = e.EmployeeID
ORDER BY p.ProjectID;";

const ASSIGNMENTS_SQL: &str = "SELECT
    a.EmployeeID,
    e.Name AS EmployeeName,
    a.ProjectID,
    p.ProjectName,
    a.Role,
    a.Salary
FROM Assignments a
INNER JOIN Employees e ON a.EmployeeID = e.EmployeeID
INNER JOIN Projects p ON a.ProjectID = p.ProjectID
ORDER BY a.EmployeeID, a.ProjectID;";

const PROJECT_PARTICIPANTS_SQL: &str = "SELECT
    e.Name AS EmployeeName,
    p.ProjectName,
    a.Role,
    a.Salary
FROM Assignments a
INNER JOIN Employees e ON a.EmployeeID = e.EmployeeID
INNER JOIN Projects p ON a.ProjectID = p.ProjectID
ORDER BY p.ProjectID, e.EmployeeID;";

const EMPLOYEE_OVERVIEW_SQL: &str = "SELECT
    e.EmployeeID,
    e.Name,
    d.DepartmentName,
    a.Role,
    a.Salary,
    p.ProjectName
FROM Employees e
LEFT JOIN Departments d ON e.DepartmentID = d.DepartmentID
LEFT JOIN Assignments a ON e.EmployeeID = a.EmployeeID
LEFT JOIN Projects p ON a.ProjectID = p.ProjectID
ORDER BY e.EmployeeID, a.ProjectID;";

const ASSIGNMENTS_WITH_MANAGER_SQL: &str = "SELECT
    e.Name AS EmployeeName,
    p.ProjectName,
    a.Role,
    a.Salary,
    m.Name AS ManagerName
FROM Assignments a
INNER JOIN Employees e ON a.EmployeeID = e.EmployeeID
INNER JOIN Projects p ON a.ProjectID = p.ProjectID
LEFT JOIN Employees m ON p.ManagerEmployeeID = m.EmployeeID
ORDER BY p.ProjectID, e.EmployeeID;";

const ABOVE_GLOBAL_AVERAGE_SQL: &str = "WITH GlobalAvg AS (
    SELECT AVG(Salary) AS GlobalAverage
    FROM Assignments
),
EmpAvg AS (
    SELECT
        a.EmployeeID,
        e.Name AS EmployeeName,
        AVG(a.Salary) AS EmpAverage
    FROM Assignments a
    INNER JOIN Employees e ON a.EmployeeID = e.EmployeeID
    GROUP BY a.EmployeeID, e.Name
)
SELECT EmployeeID, EmployeeName, EmpAverage
FROM EmpAvg
CROSS JOIN GlobalAvg
WHERE EmpAverage > GlobalAverage
ORDER BY EmpAverage DESC, EmployeeID;";

/// Runs reports against the configured store.
#[derive(Debug, Clone)]
pub struct ReportService {
    provider: ConnectionProvider,
}

impl ReportService {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    pub fn run(&self, report: Report) -> ServiceResult<Table> {
        let started_at = Instant::now();
        let conn = self.provider.open()?;

        match Table::query(&conn, report.sql(), []) {
            Ok(table) => {
                info!(
                    "event=report_run module=report status=ok report={} rows={} duration_ms={}",
                    report,
                    table.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(table)
            }
            Err(err) => {
                let err = ServiceError::from_sqlite(report.name(), Operation::Report, err);
                error!(
                    "event=report_run module=report status=error report={} duration_ms={} error_code={} error={}",
                    report,
                    started_at.elapsed().as_millis(),
                    err.error_code(),
                    sanitize_message(&err.to_string(), 240)
                );
                Err(err)
            }
        }
    }

    pub fn employees(&self) -> ServiceResult<Table> {
        self.run(Report::Employees)
    }

    pub fn projects(&self) -> ServiceResult<Table> {
        self.run(Report::Projects)
    }

    pub fn assignments(&self) -> ServiceResult<Table> {
        self.run(Report::Assignments)
    }

    pub fn project_participants(&self) -> ServiceResult<Table> {
        self.run(Report::ProjectParticipants)
    }

    pub fn employee_overview(&self) -> ServiceResult<Table> {
        self.run(Report::EmployeeOverview)
    }

    pub fn assignments_with_manager(&self) -> ServiceResult<Table> {
        self.run(Report::AssignmentsWithManager)
    }

    pub fn above_global_average(&self) -> ServiceResult<Table> {
        self.run(Report::AboveGlobalAverage)
    }

    /// Table counts, global average salary and the top `top_n` earners.
    pub fn summary(&self, top_n: u32) -> ServiceResult<DashboardSummary> {
        let started_at = Instant::now();
        let conn = self.provider.open()?;

        match summary::load(&conn, top_n) {
            Ok(summary) => {
                info!(
                    "event=report_summary module=report status=ok top_n={} duration_ms={}",
                    top_n,
                    started_at.elapsed().as_millis()
                );
                Ok(summary)
            }
            Err(err) => {
                let err = ServiceError::from_sqlite("summary", Operation::Report, err);
                error!(
                    "event=report_summary module=report status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.error_code(),
                    sanitize_message(&err.to_string(), 240)
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Report;

    #[test]
    fn report_names_round_trip_through_from_str() {
        for report in Report::ALL {
            assert_eq!(report.name().parse::<Report>().unwrap(), report);
        }
        assert_eq!(
            "Above_Global_Average".parse::<Report>().unwrap(),
            Report::AboveGlobalAverage
        );
    }

    #[test]
    fn unknown_report_lists_known_names() {
        let err = "payroll".parse::<Report>().unwrap_err();
        assert!(err.contains("employee-overview"));
    }
}
