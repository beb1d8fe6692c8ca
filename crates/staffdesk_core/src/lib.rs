//! Data-access and reporting core for the staffdesk dashboard.
//!
//! UI collaborators call the entity services and the report service; both
//! open a fresh SQLite connection per call through `ConnectionProvider`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use db::{ConnectionProvider, DbError, DbResult, ScopedConnection, StoreInfo};
pub use logging::{init_console_logging, init_logging, logging_status, LogSink};
pub use model::assignment::{Assignment, AssignmentKey};
pub use model::department::Department;
pub use model::employee::Employee;
pub use model::project::Project;
pub use model::{DepartmentId, EmployeeId, ProjectId, ValidationError};
pub use report::{Cell, DashboardSummary, EmployeeAverage, Report, ReportService, Table};
pub use repo::{
    AssignmentStore, DepartmentStore, EmployeeStore, EntityStore, ProjectStore, RepoError,
    RepoResult,
};
pub use service::{
    AssignmentService, Constraint, DepartmentService, EmployeeService, EntityService, ErrorKind,
    Operation, ProjectService, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Services sharing one provider, as a UI collaborator would hold them.
#[derive(Clone)]
pub struct Staffdesk {
    pub employees: EmployeeService,
    pub departments: DepartmentService,
    pub projects: ProjectService,
    pub assignments: AssignmentService,
    pub reports: ReportService,
    provider: ConnectionProvider,
}

impl Staffdesk {
    pub fn new(config: StoreConfig) -> Self {
        let provider = ConnectionProvider::new(config);
        Self {
            employees: EntityService::new(provider.clone()),
            departments: EntityService::new(provider.clone()),
            projects: EntityService::new(provider.clone()),
            assignments: EntityService::new(provider.clone()),
            reports: ReportService::new(provider.clone()),
            provider,
        }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
