//! Store onboarding use-cases.
//!
//! # Invariants
//! - A store and its initial tables are created together or not at all when
//!   run through [`open_store_with_tables`].

use crate::model::store::{NewStore, Store};
use crate::model::table::{NewTable, Table, TableStatus};
use crate::repo::store_repo::StoreRepository;
use crate::repo::table_repo::TableRepository;
use crate::repo::RepoResult;
use crate::service::session::Session;
use log::info;

/// Table to create alongside a new store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSeed {
    pub table_number: i32,
    pub status: TableStatus,
}

impl TableSeed {
    pub fn new(table_number: i32, status: impl Into<TableStatus>) -> Self {
        Self {
            table_number,
            status: status.into(),
        }
    }
}

/// Result of opening a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedStore {
    pub store: Store,
    pub tables: Vec<Table>,
}

/// Use-case service for store onboarding.
pub struct StoreService<S: StoreRepository, T: TableRepository> {
    stores: S,
    tables: T,
}

impl<S: StoreRepository, T: TableRepository> StoreService<S, T> {
    pub fn new(stores: S, tables: T) -> Self {
        Self { stores, tables }
    }

    /// Creates `store` and then one table per seed, in seed order.
    ///
    /// Not atomic by itself: a table failure leaves the store behind unless
    /// the repositories share a transaction.
    pub fn open_store(&self, store: &NewStore, seeds: &[TableSeed]) -> RepoResult<OpenedStore> {
        let store = self.stores.create_store(store)?;
        let mut tables = Vec::with_capacity(seeds.len());
        for seed in seeds {
            tables.push(self.tables.create_table(&NewTable {
                store_id: store.id,
                table_number: seed.table_number,
                status: seed.status.clone(),
            })?);
        }

        info!(
            "event=store_open module=service status=ok store_id={} table_count={}",
            store.id,
            tables.len()
        );
        Ok(OpenedStore { store, tables })
    }
}

/// Opens a store with its tables in one transaction.
pub fn open_store_with_tables(
    session: &mut Session,
    store: &NewStore,
    seeds: &[TableSeed],
) -> RepoResult<OpenedStore> {
    session.transaction(|uow| {
        let service = StoreService::new(uow.stores()?, uow.tables()?);
        service.open_store(store, seeds)
    })
}
