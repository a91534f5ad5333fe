//! Table repository contract and SQLite implementation.
//!
//! # Invariants
//! - `store_id` must reference an existing store on create/update.
//! - A table with reservations cannot be deleted.

use crate::model::table::{NewTable, Table, TableId, TablePatch, TableStatus};
use crate::model::EntityKind;
use crate::repo::{
    delete_restricted, ensure_connection_ready, ensure_reference, write_scope, Dependent,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TABLE_COLUMNS: &[&str] = &["table_id", "store_id", "table_number", "status"];

const TABLE_SELECT_SQL: &str = "SELECT
    table_id,
    store_id,
    table_number,
    status
FROM tables";

const TABLE_DEPENDENTS: &[Dependent] = &[Dependent {
    entity: EntityKind::Reservation,
    column: "table_id",
}];

/// Repository interface for table CRUD operations.
pub trait TableRepository {
    fn create_table(&self, table: &NewTable) -> RepoResult<Table>;
    fn get_table(&self, id: TableId) -> RepoResult<Option<Table>>;
    fn list_tables(&self) -> RepoResult<Vec<Table>>;
    fn update_table(&self, id: TableId, patch: &TablePatch) -> RepoResult<Table>;
    fn delete_table(&self, id: TableId) -> RepoResult<()>;
}

/// SQLite-backed table repository.
pub struct SqliteTableRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTableRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, EntityKind::Table, TABLE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TableRepository for SqliteTableRepository<'_> {
    fn create_table(&self, table: &NewTable) -> RepoResult<Table> {
        table.validate()?;

        write_scope(self.conn, |conn| {
            ensure_reference(conn, "store_id", EntityKind::Store, table.store_id)?;

            conn.execute(
                "INSERT INTO tables (store_id, table_number, status) VALUES (?1, ?2, ?3);",
                params![table.store_id, table.table_number, table.status.as_str()],
            )?;

            Ok(table.clone().into_table(conn.last_insert_rowid()))
        })
    }

    fn get_table(&self, id: TableId) -> RepoResult<Option<Table>> {
        load_table(self.conn, id)
    }

    fn list_tables(&self) -> RepoResult<Vec<Table>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TABLE_SELECT_SQL} ORDER BY table_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tables = Vec::new();
        while let Some(row) = rows.next()? {
            tables.push(parse_table_row(row)?);
        }
        Ok(tables)
    }

    fn update_table(&self, id: TableId, patch: &TablePatch) -> RepoResult<Table> {
        write_scope(self.conn, |conn| {
            let current = load_table(conn, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::Table,
                id,
            })?;
            let next = current.patched(patch);
            next.validate()?;

            if let Some(store_id) = patch.store_id {
                ensure_reference(conn, "store_id", EntityKind::Store, store_id)?;
            }

            conn.execute(
                "UPDATE tables
                 SET
                    store_id = ?1,
                    table_number = ?2,
                    status = ?3
                 WHERE table_id = ?4;",
                params![next.store_id, next.table_number, next.status.as_str(), id],
            )?;
            Ok(next)
        })
    }

    fn delete_table(&self, id: TableId) -> RepoResult<()> {
        delete_restricted(self.conn, EntityKind::Table, id, TABLE_DEPENDENTS)
    }
}

fn load_table(conn: &Connection, id: TableId) -> RepoResult<Option<Table>> {
    let mut stmt = conn.prepare(&format!("{TABLE_SELECT_SQL} WHERE table_id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_table_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_table_row(row: &Row<'_>) -> RepoResult<Table> {
    Ok(Table {
        id: row.get("table_id")?,
        store_id: row.get("store_id")?,
        table_number: row.get("table_number")?,
        status: TableStatus::from(row.get::<_, String>("status")?),
    })
}
