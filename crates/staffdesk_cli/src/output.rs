use crate::cli::OutputFormat;
use staffdesk_core::{
    Assignment, Cell, DbResult, Department, Employee, Project, StoreInfo, Table,
};
use std::path::Path;

const MIN_COLUMN_WIDTH: usize = 4;

/// Renders a report table in the requested format.
pub fn render_table(table: &Table, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Table => render_aligned(table),
        OutputFormat::Csv => table.to_csv(),
        OutputFormat::Json => serde_json::to_string_pretty(table)? + "\n",
    })
}

/// Status screen lines; a connection failure is still rendered as a status.
pub fn render_status(database_path: &Path, store: &DbResult<StoreInfo>) -> String {
    let mut out = format!("database:       {}\n", database_path.display());
    match store {
        Ok(info) => {
            out.push_str("status:         connected\n");
            out.push_str(&format!("sqlite version: {}\n", info.sqlite_version));
            out.push_str(&format!("schema version: {}\n", info.schema_version));
        }
        Err(err) => out.push_str(&format!("status:         cannot connect ({err})\n")),
    }
    out.push_str(&format!(
        "core version:   {}\n",
        staffdesk_core::core_version()
    ));
    out
}

/// Aligned plain-text rendering; numbers are right-aligned.
pub fn render_aligned(table: &Table) -> String {
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(display_cell).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rendered
                .iter()
                .map(|row| row[index].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    let header_line = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{header:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");

    let mut out = String::new();
    out.push_str(header_line.trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(header_line.trim_end().chars().count()));
    out.push('\n');

    for (row, cells) in table.rows.iter().zip(&rendered) {
        let line = cells
            .iter()
            .zip(row)
            .zip(&widths)
            .map(|((text, cell), width)| match cell {
                Cell::Integer(_) | Cell::Real(_) => format!("{text:>width$}"),
                Cell::Null | Cell::Text(_) => format!("{text:<width$}"),
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("({} rows)\n", table.len()));
    out
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Null => "-".to_string(),
        other => other.to_string(),
    }
}

pub fn employees_table(employees: &[Employee]) -> Table {
    Table {
        columns: columns(&["EmployeeID", "Name", "DateOfBirth", "DepartmentID"]),
        rows: employees
            .iter()
            .map(|employee| {
                vec![
                    optional_integer(employee.id),
                    Cell::Text(employee.name.clone()),
                    Cell::Text(employee.date_of_birth.to_string()),
                    optional_integer(employee.department_id),
                ]
            })
            .collect(),
    }
}

pub fn departments_table(departments: &[Department]) -> Table {
    Table {
        columns: columns(&["DepartmentID", "DepartmentName"]),
        rows: departments
            .iter()
            .map(|department| {
                vec![
                    optional_integer(department.id),
                    Cell::Text(department.name.clone()),
                ]
            })
            .collect(),
    }
}

pub fn projects_table(projects: &[Project]) -> Table {
    Table {
        columns: columns(&["ProjectID", "ProjectName", "ManagerEmployeeID"]),
        rows: projects
            .iter()
            .map(|project| {
                vec![
                    optional_integer(project.id),
                    Cell::Text(project.name.clone()),
                    optional_integer(project.manager_id),
                ]
            })
            .collect(),
    }
}

pub fn assignments_table(assignments: &[Assignment]) -> Table {
    Table {
        columns: columns(&["EmployeeID", "ProjectID", "Role", "Salary"]),
        rows: assignments
            .iter()
            .map(|assignment| {
                vec![
                    Cell::Integer(assignment.employee_id),
                    Cell::Integer(assignment.project_id),
                    Cell::Text(assignment.role.clone()),
                    Cell::Real(assignment.salary),
                ]
            })
            .collect(),
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn optional_integer(value: Option<i64>) -> Cell {
    value.map_or(Cell::Null, Cell::Integer)
}
