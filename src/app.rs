//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::Config;
use crate::db;
use crate::error::Error;

/// Handle to everything a request handler needs — today, the database.
///
/// Cheap to clone; one lives inside every connection task. All database
/// work funnels through a single mutex-guarded connection, so requests
/// serialize at the store. That is the intended model for this service.
#[derive(Clone)]
pub struct App {
    db: Arc<Mutex<Connection>>,
}

impl App {
    /// Wraps an already-bootstrapped connection (see [`crate::db`]).
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens the configured database and applies migrations.
    pub fn open(config: &Config) -> Result<Self, Error> {
        let conn = if config.database == ":memory:" {
            db::open_db_in_memory()?
        } else {
            db::open_db(&config.database)?
        };
        Ok(Self::new(conn))
    }

    /// Locks the database connection for the duration of one operation.
    ///
    /// Handlers must not hold the guard across an await point.
    pub fn db(&self) -> MutexGuard<'_, Connection> {
        // A poisoned mutex means a handler panicked mid-statement; the
        // connection state is suspect and continuing would hide it.
        self.db.lock().expect("database mutex poisoned")
    }
}
