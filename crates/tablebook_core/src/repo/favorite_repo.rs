//! Favorite repository contract and SQLite implementation.
//!
//! Favorites have no dependents, so deletes only fail on a missing id.

use crate::model::favorite::{Favorite, FavoriteId, FavoritePatch, NewFavorite};
use crate::model::EntityKind;
use crate::repo::{
    delete_restricted, ensure_connection_ready, ensure_reference, write_scope, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const FAVORITE_COLUMNS: &[&str] = &["favorite_id", "customer_id", "store_id"];

const FAVORITE_SELECT_SQL: &str = "SELECT
    favorite_id,
    customer_id,
    store_id
FROM favorites";

/// Repository interface for favorite CRUD operations.
pub trait FavoriteRepository {
    fn create_favorite(&self, favorite: &NewFavorite) -> RepoResult<Favorite>;
    fn get_favorite(&self, id: FavoriteId) -> RepoResult<Option<Favorite>>;
    fn list_favorites(&self) -> RepoResult<Vec<Favorite>>;
    fn update_favorite(&self, id: FavoriteId, patch: &FavoritePatch) -> RepoResult<Favorite>;
    fn delete_favorite(&self, id: FavoriteId) -> RepoResult<()>;
}

/// SQLite-backed favorite repository.
pub struct SqliteFavoriteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFavoriteRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, EntityKind::Favorite, FAVORITE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl FavoriteRepository for SqliteFavoriteRepository<'_> {
    fn create_favorite(&self, favorite: &NewFavorite) -> RepoResult<Favorite> {
        write_scope(self.conn, |conn| {
            ensure_reference(conn, "customer_id", EntityKind::User, favorite.customer_id)?;
            ensure_reference(conn, "store_id", EntityKind::Store, favorite.store_id)?;

            conn.execute(
                "INSERT INTO favorites (customer_id, store_id) VALUES (?1, ?2);",
                params![favorite.customer_id, favorite.store_id],
            )?;

            Ok(favorite.into_favorite(conn.last_insert_rowid()))
        })
    }

    fn get_favorite(&self, id: FavoriteId) -> RepoResult<Option<Favorite>> {
        load_favorite(self.conn, id)
    }

    fn list_favorites(&self) -> RepoResult<Vec<Favorite>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FAVORITE_SELECT_SQL} ORDER BY favorite_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut favorites = Vec::new();
        while let Some(row) = rows.next()? {
            favorites.push(parse_favorite_row(row)?);
        }
        Ok(favorites)
    }

    fn update_favorite(&self, id: FavoriteId, patch: &FavoritePatch) -> RepoResult<Favorite> {
        write_scope(self.conn, |conn| {
            let current = load_favorite(conn, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::Favorite,
                id,
            })?;
            let next = current.patched(patch);

            if let Some(customer_id) = patch.customer_id {
                ensure_reference(conn, "customer_id", EntityKind::User, customer_id)?;
            }
            if let Some(store_id) = patch.store_id {
                ensure_reference(conn, "store_id", EntityKind::Store, store_id)?;
            }

            conn.execute(
                "UPDATE favorites
                 SET
                    customer_id = ?1,
                    store_id = ?2
                 WHERE favorite_id = ?3;",
                params![next.customer_id, next.store_id, id],
            )?;
            Ok(next)
        })
    }

    fn delete_favorite(&self, id: FavoriteId) -> RepoResult<()> {
        delete_restricted(self.conn, EntityKind::Favorite, id, &[])
    }
}

fn load_favorite(conn: &Connection, id: FavoriteId) -> RepoResult<Option<Favorite>> {
    let mut stmt = conn.prepare(&format!("{FAVORITE_SELECT_SQL} WHERE favorite_id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_favorite_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_favorite_row(row: &Row<'_>) -> RepoResult<Favorite> {
    Ok(Favorite {
        id: row.get("favorite_id")?,
        customer_id: row.get("customer_id")?,
        store_id: row.get("store_id")?,
    })
}
