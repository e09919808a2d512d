//! SQLite bootstrap and schema migrations.
//!
//! Connections returned by [`open_db`] / [`open_db_in_memory`] are ready to
//! use: pragmas configured, busy timeout set, and all pending migrations
//! applied. Application code must not touch the `posts` table through a
//! connection that did not go through this module.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{error, info};

pub mod migrations;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(e) => write!(f, "{e}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl StdError for DbError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Sqlite(e) => Some(e),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e)
    }
}

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mut conn = Connection::open(path).inspect_err(|e| {
        error!(error = %e, "failed to open database file");
    })?;

    bootstrap_connection(&mut conn)?;
    info!(
        duration_ms = started_at.elapsed().as_millis() as u64,
        schema_version = migrations::latest_version(),
        "database open"
    );
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// The store lives and dies with the connection — useful for tests and for
/// running with `PLUME_DB=:memory:`.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    migrations::apply_migrations(conn)?;
    Ok(())
}
