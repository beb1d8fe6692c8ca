use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use staffdesk_core::{DepartmentId, EmployeeId, ProjectId};
use std::path::PathBuf;

/// Top-level CLI parser for the `staffdesk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "staffdesk",
    version,
    about = "Staffdesk - employee, department and project records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file; ignored when --config is given
    #[arg(long, global = true, env = "STAFFDESK_DB")]
    pub db: Option<PathBuf>,

    /// JSON store config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Write rotating logs to this absolute directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Show database and version information
    Status,
    /// List every row of one table
    List {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Insert one row
    Create {
        #[command(subcommand)]
        record: CreateRecord,
    },
    /// Overwrite every field of one row
    Update {
        #[command(subcommand)]
        record: UpdateRecord,
    },
    /// Remove one row
    Delete {
        #[command(subcommand)]
        target: DeleteTarget,
    },
    /// Run a named report
    Report {
        /// Report name, e.g. employees or above-global-average
        name: String,
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Write the rendered report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dashboard figures
    Summary {
        /// Number of top earners to show
        #[arg(long, default_value_t = 5)]
        top: u32,
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Args)]
pub struct EmployeeFields {
    #[arg(long)]
    pub name: String,
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: NaiveDate,
    #[arg(long)]
    pub department: Option<DepartmentId>,
}

#[derive(Debug, Args)]
pub struct DepartmentFields {
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub name: String,
    /// Managing employee id
    #[arg(long)]
    pub manager: Option<EmployeeId>,
}

/// Assignment fields; the employee/project pair is also the row key.
#[derive(Debug, Args)]
pub struct AssignmentFields {
    #[arg(long)]
    pub employee: EmployeeId,
    #[arg(long)]
    pub project: ProjectId,
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub salary: f64,
}

#[derive(Debug, Subcommand)]
pub enum CreateRecord {
    Employee {
        /// Explicit id; omitted means the store assigns one
        #[arg(long)]
        id: Option<EmployeeId>,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    Department {
        #[arg(long)]
        id: Option<DepartmentId>,
        #[command(flatten)]
        fields: DepartmentFields,
    },
    Project {
        #[arg(long)]
        id: Option<ProjectId>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    Assignment(AssignmentFields),
}

#[derive(Debug, Subcommand)]
pub enum UpdateRecord {
    Employee {
        #[arg(long)]
        id: EmployeeId,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    Department {
        #[arg(long)]
        id: DepartmentId,
        #[command(flatten)]
        fields: DepartmentFields,
    },
    Project {
        #[arg(long)]
        id: ProjectId,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Changes role and salary of an existing pair
    Assignment(AssignmentFields),
}

#[derive(Debug, Subcommand)]
pub enum DeleteTarget {
    Employee {
        #[arg(long)]
        id: EmployeeId,
    },
    Department {
        #[arg(long)]
        id: DepartmentId,
    },
    Project {
        #[arg(long)]
        id: ProjectId,
    },
    Assignment {
        #[arg(long)]
        employee: EmployeeId,
        #[arg(long)]
        project: ProjectId,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Entity {
    Employees,
    Departments,
    Projects,
    Assignments,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}
