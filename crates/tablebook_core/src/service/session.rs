//! Scoped database session and unit-of-work access.
//!
//! # Responsibility
//! - Own exactly one SQLite connection for one logical unit of work.
//! - Hand out repositories bound to that connection or to a transaction.
//!
//! # Invariants
//! - The connection is released when the session is dropped, on every exit path.
//! - `transaction` commits only when the closure succeeds; any error rolls back
//!   every write made through the unit of work.
//! - Repositories obtained from a transactional unit of work join that
//!   transaction instead of opening their own.

use crate::config::StoreConfig;
use crate::db::{open_db, open_db_in_memory};
use crate::repo::favorite_repo::SqliteFavoriteRepository;
use crate::repo::reservation_repo::SqliteReservationRepository;
use crate::repo::store_repo::SqliteStoreRepository;
use crate::repo::table_repo::SqliteTableRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::{RepoError, RepoResult};
use log::{debug, info, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Instant;

/// Owner of one migrated connection.
pub struct Session {
    conn: Connection,
    opened_at: Instant,
}

impl Session {
    /// Opens the database configured in `config`.
    pub fn open(config: &StoreConfig) -> RepoResult<Self> {
        Self::open_path(&config.db_path)
    }

    /// Opens (or creates) a database file.
    pub fn open_path(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a fresh in-memory database.
    pub fn in_memory() -> RepoResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already opened connection.
    ///
    /// Schema readiness is still checked whenever a repository is requested.
    pub fn from_connection(conn: Connection) -> Self {
        debug!("event=session_open module=service status=ok");
        Self {
            conn,
            opened_at: Instant::now(),
        }
    }

    /// Raw connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Unit of work in autocommit mode: every repository write commits on its own.
    pub fn unit(&self) -> UnitOfWork<'_> {
        UnitOfWork { conn: &self.conn }
    }

    /// Runs `f` inside one IMMEDIATE transaction.
    ///
    /// # Errors
    /// - Returns the closure error unchanged after rolling back.
    /// - Returns `RepoError::Db` when the transaction cannot begin or commit.
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&UnitOfWork<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;

        let outcome = f(&UnitOfWork { conn: &*tx });
        match outcome {
            Ok(value) => {
                tx.commit().map_err(RepoError::from)?;
                info!(
                    "event=tx_commit module=service status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                drop(tx);
                warn!(
                    "event=tx_rollback module=service status=error duration_ms={} error_code={}",
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// Closes the session explicitly, surfacing close errors.
    pub fn close(self) -> RepoResult<()> {
        let Self { conn, opened_at } = self;
        conn.close().map_err(|(_, err)| RepoError::from(err))?;
        debug!(
            "event=session_close module=service status=ok duration_ms={}",
            opened_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Repository factory bound to one connection or transaction.
pub struct UnitOfWork<'conn> {
    conn: &'conn Connection,
}

impl<'conn> UnitOfWork<'conn> {
    pub fn users(&self) -> RepoResult<SqliteUserRepository<'conn>> {
        SqliteUserRepository::try_new(self.conn)
    }

    pub fn stores(&self) -> RepoResult<SqliteStoreRepository<'conn>> {
        SqliteStoreRepository::try_new(self.conn)
    }

    pub fn tables(&self) -> RepoResult<SqliteTableRepository<'conn>> {
        SqliteTableRepository::try_new(self.conn)
    }

    pub fn favorites(&self) -> RepoResult<SqliteFavoriteRepository<'conn>> {
        SqliteFavoriteRepository::try_new(self.conn)
    }

    pub fn reservations(&self) -> RepoResult<SqliteReservationRepository<'conn>> {
        SqliteReservationRepository::try_new(self.conn)
    }
}
