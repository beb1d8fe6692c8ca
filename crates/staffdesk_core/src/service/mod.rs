//! Entity use-case services.
//!
//! # Responsibility
//! - Expose list/create/update/delete per entity to UI collaborators.
//! - Own the connection-per-call and commit/rollback policy.
//! - Return typed `ServiceError`s instead of raw store errors.

pub mod entity_service;
pub mod error;

pub use entity_service::{
    AssignmentService, DepartmentService, EmployeeService, EntityService, ProjectService,
};
pub use error::{Constraint, ErrorKind, Operation, ServiceError, ServiceResult};
