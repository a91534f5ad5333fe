//! Storage layer for the reservation store.
//!
//! Connections handed out by this module are migrated to the latest schema
//! and enforce foreign keys; repositories rely on both. The schema version
//! lives in `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure: the database could not be reached or prepared.
#[derive(Debug)]
pub enum DbError {
    /// SQLite failed outside of a migration step.
    Sqlite(rusqlite::Error),
    /// File was written by a newer build with tables this one does not know.
    SchemaTooNew {
        db_version: u32,
        latest_supported: u32,
    },
    /// One migration script failed; nothing from the run was kept.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// SQLite accepted `PRAGMA foreign_keys = ON` but did not enable it.
    ForeignKeysUnavailable,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema {db_version} is newer than this build ({latest_supported})"
            ),
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "migration {version} ({name}) failed: {source}"),
            Self::ForeignKeysUnavailable => {
                f.write_str("foreign key enforcement is not available on this connection")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } | Self::ForeignKeysUnavailable => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
