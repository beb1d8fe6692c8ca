//! Per-call connection provider.
//!
//! # Responsibility
//! - Turn an injected `StoreConfig` into a fresh connection for each call.
//! - Release the handle on every exit path through `ScopedConnection`.
//!
//! # Invariants
//! - No connection is pooled or shared between calls.
//! - Open failures come back as `DbError` values, never panics.

use super::migrations::current_user_version;
use super::open::open_db;
use super::DbResult;
use crate::config::StoreConfig;
use log::debug;
use rusqlite::Connection;
use serde::Serialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::time::Instant;

/// Hands out one bootstrapped connection per service call.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: StoreConfig,
}

/// Store metadata for status screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    pub database_path: PathBuf,
    pub sqlite_version: String,
    pub schema_version: u32,
}

impl ConnectionProvider {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens a fresh connection; the caller releases it by dropping the guard.
    pub fn open(&self) -> DbResult<ScopedConnection> {
        let conn = open_db(&self.config)?;
        Ok(ScopedConnection {
            conn,
            opened_at: Instant::now(),
        })
    }

    /// Creates the database if needed and applies migrations.
    pub fn initialize(&self) -> DbResult<u32> {
        let conn = self.open()?;
        current_user_version(&conn)
    }

    /// Opens a connection and reports store metadata.
    pub fn probe(&self) -> DbResult<StoreInfo> {
        let conn = self.open()?;
        Ok(StoreInfo {
            database_path: self.config.database_path.clone(),
            sqlite_version: rusqlite::version().to_string(),
            schema_version: current_user_version(&conn)?,
        })
    }
}

/// Connection guard scoped to a single service call.
pub struct ScopedConnection {
    conn: Connection,
    opened_at: Instant,
}

impl Deref for ScopedConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        debug!(
            "event=db_close module=db status=ok held_ms={}",
            self.opened_at.elapsed().as_millis()
        );
    }
}
