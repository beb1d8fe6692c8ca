//! Uniform CRUD service over one entity table.
//!
//! # Responsibility
//! - Open one connection per call and release it on every exit path.
//! - Run each write in its own transaction: commit on success, explicit
//!   rollback on failure.
//! - Convert repository failures into `ServiceError` and log them.
//!
//! # Invariants
//! - No connection outlives the call that opened it.
//! - `update`/`delete` report `true` only when exactly one row was affected.

use crate::db::ConnectionProvider;
use crate::logging::sanitize_message;
use crate::repo::{
    AssignmentStore, DepartmentStore, EmployeeStore, EntityStore, ProjectStore, RepoResult,
};
use crate::service::error::{Operation, ServiceError, ServiceResult};
use log::{error, info, warn};
use rusqlite::Connection;
use std::marker::PhantomData;
use std::time::Instant;

pub type EmployeeService = EntityService<EmployeeStore>;
pub type DepartmentService = EntityService<DepartmentStore>;
pub type ProjectService = EntityService<ProjectStore>;
pub type AssignmentService = EntityService<AssignmentStore>;

/// CRUD entry points for the table behind `S`.
pub struct EntityService<S: EntityStore> {
    provider: ConnectionProvider,
    _store: PhantomData<S>,
}

impl<S: EntityStore> Clone for EntityService<S> {
    fn clone(&self) -> Self {
        Self::new(self.provider.clone())
    }
}

impl<S: EntityStore> EntityService<S> {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self {
            provider,
            _store: PhantomData,
        }
    }

    /// Returns every row of the table, ordered by primary key.
    pub fn list(&self) -> ServiceResult<Vec<S::Record>> {
        let started_at = Instant::now();
        let conn = self.provider.open()?;

        match S::list_all(&conn) {
            Ok(records) => {
                info!(
                    "event=entity_list module=service status=ok entity={} rows={} duration_ms={}",
                    S::ENTITY,
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(err) => {
                let err = ServiceError::from_repo(S::ENTITY, Operation::List, err);
                log_failure::<S>(Operation::List, None, &err, started_at);
                Err(err)
            }
        }
    }

    /// Inserts `record` and returns the key the store assigned or accepted.
    pub fn create(&self, record: &S::Record) -> ServiceResult<S::Key> {
        self.write(Operation::Create, None, |conn| S::insert(conn, record))
    }

    /// Overwrites every mutable field of the row at `key`.
    ///
    /// `Ok(false)` means no row matched; that is not an error.
    pub fn update(&self, key: S::Key, record: &S::Record) -> ServiceResult<bool> {
        let changed = self.write(Operation::Update, Some(key), |conn| {
            S::update(conn, key, record)
        })?;
        Ok(changed == 1)
    }

    /// Removes the row at `key`; `Ok(false)` means nothing was removed.
    pub fn delete(&self, key: S::Key) -> ServiceResult<bool> {
        let removed = self.write(Operation::Delete, Some(key), |conn| S::delete(conn, key))?;
        Ok(removed == 1)
    }

    fn write<T>(
        &self,
        operation: Operation,
        key: Option<S::Key>,
        statement: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        let mut conn = self.provider.open()?;
        let tx = conn
            .transaction()
            .map_err(|err| ServiceError::from_sqlite(S::ENTITY, operation, err))?;

        match statement(&tx) {
            Ok(value) => {
                if let Err(err) = tx.commit() {
                    let err = ServiceError::from_sqlite(S::ENTITY, operation, err);
                    log_failure::<S>(operation, key, &err, started_at);
                    return Err(err);
                }
                info!(
                    "event=entity_{} module=service status=ok entity={} key={} duration_ms={}",
                    operation,
                    S::ENTITY,
                    key_label::<S>(key),
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=tx_rollback module=service status=error entity={} error={}",
                        S::ENTITY,
                        rollback_err
                    );
                }
                let err = ServiceError::from_repo(S::ENTITY, operation, err);
                log_failure::<S>(operation, key, &err, started_at);
                Err(err)
            }
        }
    }
}

fn key_label<S: EntityStore>(key: Option<S::Key>) -> String {
    key.map_or_else(|| "-".to_string(), |key| key.to_string())
}

fn log_failure<S: EntityStore>(
    operation: Operation,
    key: Option<S::Key>,
    err: &ServiceError,
    started_at: Instant,
) {
    error!(
        "event=entity_{} module=service status=error entity={} key={} duration_ms={} error_code={} error={}",
        operation,
        S::ENTITY,
        key_label::<S>(key),
        started_at.elapsed().as_millis(),
        err.error_code(),
        sanitize_message(&err.to_string(), 240)
    );
}
