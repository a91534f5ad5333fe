//! Reservation data store for restaurants: users, stores, tables, favorites
//! and reservations over SQLite.
//! This crate is the single source of truth for data-model invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::favorite::{Favorite, FavoriteId, FavoritePatch, NewFavorite};
pub use model::reservation::{NewReservation, Reservation, ReservationId, ReservationPatch};
pub use model::store::{NewStore, Store, StoreId, StorePatch};
pub use model::table::{NewTable, Table, TableId, TablePatch, TableStatus};
pub use model::user::{NewUser, User, UserId, UserPatch, UserRole};
pub use model::validation::ValidationError;
pub use model::EntityKind;
pub use repo::favorite_repo::{FavoriteRepository, SqliteFavoriteRepository};
pub use repo::reservation_repo::{ReservationRepository, SqliteReservationRepository};
pub use repo::store_repo::{SqliteStoreRepository, StoreRepository};
pub use repo::table_repo::{SqliteTableRepository, TableRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoErrorKind, RepoResult};
pub use service::booking_service::{BookingRequest, BookingService};
pub use service::session::{Session, UnitOfWork};
pub use service::store_service::{open_store_with_tables, OpenedStore, StoreService, TableSeed};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
