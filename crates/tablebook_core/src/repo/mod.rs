//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity CRUD contracts.
//! - Isolate SQLite query details from service orchestration.
//! - Enforce referential integrity on every write.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - Foreign key existence checks and the write they guard run in one
//!   transaction.
//! - Deletes follow a RESTRICT policy: rows still referenced are never removed.
//! - Update and delete address rows by primary key only.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod favorite_repo;
pub mod reservation_repo;
pub mod store_repo;
pub mod table_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse classification of [`RepoError`] for callers that only branch on
/// the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoErrorKind {
    /// Input or referential rule rejected the write.
    ConstraintViolation,
    /// Addressed row does not exist.
    NotFound,
    /// Storage could not be reached or failed mid-operation.
    ConnectionFailure,
    /// Connection schema does not match what this build expects.
    Schema,
    /// Persisted row could not be converted into a record.
    InvalidData,
}

/// Error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Field failed basic type/format validation.
    Validation(ValidationError),
    /// Foreign key field points at a row that does not exist.
    MissingReference {
        field: &'static str,
        entity: EntityKind,
        id: i64,
    },
    /// Delete rejected because dependent rows still point at the target.
    StillReferenced {
        entity: EntityKind,
        id: i64,
        dependent: EntityKind,
        count: i64,
    },
    /// SQLite rejected the write with a foreign key constraint failure.
    ForeignKeyRejected(String),
    /// SQLite rejected the write with any other constraint failure.
    ConstraintRejected(String),
    /// Update/delete addressed an id with no matching row.
    NotFound { entity: EntityKind, id: i64 },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl RepoError {
    pub fn kind(&self) -> RepoErrorKind {
        match self {
            Self::Validation(_)
            | Self::MissingReference { .. }
            | Self::StillReferenced { .. }
            | Self::ForeignKeyRejected(_)
            | Self::ConstraintRejected(_) => RepoErrorKind::ConstraintViolation,
            Self::NotFound { .. } => RepoErrorKind::NotFound,
            Self::Db(DbError::SchemaTooNew { .. })
            | Self::Db(DbError::Migration { .. })
            | Self::Db(DbError::ForeignKeysUnavailable)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => RepoErrorKind::Schema,
            Self::Db(DbError::Sqlite(_)) => RepoErrorKind::ConnectionFailure,
            Self::InvalidData(_) => RepoErrorKind::InvalidData,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.kind() == RepoErrorKind::ConstraintViolation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == RepoErrorKind::NotFound
    }

    /// Stable snake_case code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::MissingReference { .. } => "missing_reference",
            Self::StillReferenced { .. } => "still_referenced",
            Self::ForeignKeyRejected(_) => "foreign_key_rejected",
            Self::ConstraintRejected(_) => "constraint_rejected",
            Self::NotFound { .. } => "not_found",
            Self::Db(_) => "db_error",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::MissingRequiredColumn { .. } => "missing_column",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "constraint violation: {err}"),
            Self::MissingReference { field, entity, id } => write!(
                f,
                "constraint violation: `{field}` references missing {entity} {id}"
            ),
            Self::StillReferenced {
                entity,
                id,
                dependent,
                count,
            } => write!(
                f,
                "constraint violation: {entity} {id} is still referenced by {count} {dependent} row(s)"
            ),
            Self::ForeignKeyRejected(message) | Self::ConstraintRejected(message) => {
                write!(f, "constraint violation: {message}")
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        let rusqlite::Error::SqliteFailure(err, message) = &value else {
            return Self::Db(DbError::Sqlite(value));
        };
        if err.code != rusqlite::ErrorCode::ConstraintViolation {
            return Self::Db(DbError::Sqlite(value));
        }

        // RESTRICT actions surface as SQLITE_CONSTRAINT_TRIGGER, not _FOREIGNKEY.
        let is_foreign_key = matches!(
            err.extended_code,
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY | rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER
        ) || message
            .as_deref()
            .is_some_and(|text| text.contains("FOREIGN KEY"));
        let message = message
            .clone()
            .unwrap_or_else(|| format!("constraint failed (code {})", err.extended_code));
        if is_foreign_key {
            Self::ForeignKeyRejected(message)
        } else {
            Self::ConstraintRejected(message)
        }
    }
}

/// Foreign key column in a dependent table pointing at some parent entity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dependent {
    pub entity: EntityKind,
    pub column: &'static str,
}

/// Verifies schema version and the presence of `entity`'s table and columns.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    entity: EntityKind,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table = entity.table_name();
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

/// Runs `f` atomically.
///
/// Opens an IMMEDIATE transaction when `conn` is in autocommit mode; inside a
/// caller-owned transaction `f` joins it instead. Dropping an uncommitted
/// transaction rolls it back.
pub(crate) fn write_scope<T>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    if !conn.is_autocommit() {
        return f(conn);
    }

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = f(&*tx)?;
    tx.commit()?;
    Ok(value)
}

pub(crate) fn row_exists(conn: &Connection, entity: EntityKind, id: i64) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1);",
            entity.table_name(),
            entity.id_column()
        ),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Fails with `MissingReference` unless `entity` has a row with `id`.
pub(crate) fn ensure_reference(
    conn: &Connection,
    field: &'static str,
    entity: EntityKind,
    id: i64,
) -> RepoResult<()> {
    if row_exists(conn, entity, id)? {
        Ok(())
    } else {
        Err(RepoError::MissingReference { field, entity, id })
    }
}

/// Deletes one row under the RESTRICT policy.
///
/// Fails with `NotFound` when the row is absent and with `StillReferenced`
/// when any dependent column still points at it.
pub(crate) fn delete_restricted(
    conn: &Connection,
    entity: EntityKind,
    id: i64,
    dependents: &[Dependent],
) -> RepoResult<()> {
    write_scope(conn, |conn| {
        if !row_exists(conn, entity, id)? {
            return Err(RepoError::NotFound { entity, id });
        }

        for dependent in dependents {
            let count: i64 = conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} = ?1;",
                    dependent.entity.table_name(),
                    dependent.column
                ),
                [id],
                |row| row.get(0),
            )?;
            if count > 0 {
                return Err(RepoError::StillReferenced {
                    entity,
                    id,
                    dependent: dependent.entity,
                    count,
                });
            }
        }

        conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                entity.table_name(),
                entity.id_column()
            ),
            [id],
        )?;
        Ok(())
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(extended_code: i32, message: Option<&str>) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(extended_code),
            message.map(str::to_string),
        )
    }

    #[test]
    fn restrict_trigger_code_maps_to_foreign_key_rejection() {
        let err = RepoError::from(sqlite_failure(
            rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER,
            Some("FOREIGN KEY constraint failed"),
        ));
        assert!(matches!(err, RepoError::ForeignKeyRejected(_)));
        assert_eq!(err.kind(), RepoErrorKind::ConstraintViolation);
    }

    #[test]
    fn other_constraint_failures_are_not_connection_failures() {
        let err = RepoError::from(sqlite_failure(
            rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
            Some("NOT NULL constraint failed: users.name"),
        ));
        assert!(matches!(err, RepoError::ConstraintRejected(_)));
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn busy_database_stays_a_connection_failure() {
        let err = RepoError::from(sqlite_failure(rusqlite::ffi::SQLITE_BUSY, None));
        assert_eq!(err.kind(), RepoErrorKind::ConnectionFailure);
    }
}
