//! Store repository contract and SQLite implementation.
//!
//! # Invariants
//! - `owner_id` and `staff_id` must reference existing users on create/update.
//! - A store with tables or favorites cannot be deleted.

use crate::model::store::{NewStore, Store, StoreId, StorePatch};
use crate::model::EntityKind;
use crate::repo::{
    delete_restricted, ensure_connection_ready, ensure_reference, write_scope, Dependent,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STORE_COLUMNS: &[&str] = &[
    "store_id",
    "owner_id",
    "staff_id",
    "name",
    "open_timebooking",
    "cancel_reserve",
];

const STORE_SELECT_SQL: &str = "SELECT
    store_id,
    owner_id,
    staff_id,
    name,
    open_timebooking,
    cancel_reserve
FROM stores";

const STORE_DEPENDENTS: &[Dependent] = &[
    Dependent {
        entity: EntityKind::Table,
        column: "store_id",
    },
    Dependent {
        entity: EntityKind::Favorite,
        column: "store_id",
    },
];

/// Repository interface for store CRUD operations.
pub trait StoreRepository {
    fn create_store(&self, store: &NewStore) -> RepoResult<Store>;
    fn get_store(&self, id: StoreId) -> RepoResult<Option<Store>>;
    fn list_stores(&self) -> RepoResult<Vec<Store>>;
    fn update_store(&self, id: StoreId, patch: &StorePatch) -> RepoResult<Store>;
    fn delete_store(&self, id: StoreId) -> RepoResult<()>;
}

/// SQLite-backed store repository.
pub struct SqliteStoreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStoreRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, EntityKind::Store, STORE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl StoreRepository for SqliteStoreRepository<'_> {
    fn create_store(&self, store: &NewStore) -> RepoResult<Store> {
        store.validate()?;

        write_scope(self.conn, |conn| {
            ensure_reference(conn, "owner_id", EntityKind::User, store.owner_id)?;
            ensure_reference(conn, "staff_id", EntityKind::User, store.staff_id)?;

            conn.execute(
                "INSERT INTO stores (
                    owner_id,
                    staff_id,
                    name,
                    open_timebooking,
                    cancel_reserve
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    store.owner_id,
                    store.staff_id,
                    store.name.as_str(),
                    store.open_time_booking.as_str(),
                    store.cancel_reserve.as_str(),
                ],
            )?;

            Ok(store.clone().into_store(conn.last_insert_rowid()))
        })
    }

    fn get_store(&self, id: StoreId) -> RepoResult<Option<Store>> {
        load_store(self.conn, id)
    }

    fn list_stores(&self) -> RepoResult<Vec<Store>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STORE_SELECT_SQL} ORDER BY store_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut stores = Vec::new();
        while let Some(row) = rows.next()? {
            stores.push(parse_store_row(row)?);
        }
        Ok(stores)
    }

    fn update_store(&self, id: StoreId, patch: &StorePatch) -> RepoResult<Store> {
        write_scope(self.conn, |conn| {
            let current = load_store(conn, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::Store,
                id,
            })?;
            let next = current.patched(patch);
            next.validate()?;

            if let Some(owner_id) = patch.owner_id {
                ensure_reference(conn, "owner_id", EntityKind::User, owner_id)?;
            }
            if let Some(staff_id) = patch.staff_id {
                ensure_reference(conn, "staff_id", EntityKind::User, staff_id)?;
            }

            conn.execute(
                "UPDATE stores
                 SET
                    owner_id = ?1,
                    staff_id = ?2,
                    name = ?3,
                    open_timebooking = ?4,
                    cancel_reserve = ?5
                 WHERE store_id = ?6;",
                params![
                    next.owner_id,
                    next.staff_id,
                    next.name.as_str(),
                    next.open_time_booking.as_str(),
                    next.cancel_reserve.as_str(),
                    id,
                ],
            )?;
            Ok(next)
        })
    }

    fn delete_store(&self, id: StoreId) -> RepoResult<()> {
        delete_restricted(self.conn, EntityKind::Store, id, STORE_DEPENDENTS)
    }
}

fn load_store(conn: &Connection, id: StoreId) -> RepoResult<Option<Store>> {
    let mut stmt = conn.prepare(&format!("{STORE_SELECT_SQL} WHERE store_id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_store_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_store_row(row: &Row<'_>) -> RepoResult<Store> {
    Ok(Store {
        id: row.get("store_id")?,
        owner_id: row.get("owner_id")?,
        staff_id: row.get("staff_id")?,
        name: row.get("name")?,
        open_time_booking: row.get("open_timebooking")?,
        cancel_reserve: row.get("cancel_reserve")?,
    })
}
