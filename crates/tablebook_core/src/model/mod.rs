//! Relational domain model for the reservation data store.
//!
//! # Responsibility
//! - Define the five persisted records and their create/patch inputs.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - Foreign keys are plain ids; existence is enforced by the repository layer.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod favorite;
pub mod reservation;
pub mod store;
pub mod table;
pub mod user;
pub mod validation;

/// One of the five row types in the relational model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Store,
    Table,
    Favorite,
    Reservation,
}

impl EntityKind {
    /// All entity kinds in dependency order (referenced before referencing).
    pub const ALL: [EntityKind; 5] = [
        EntityKind::User,
        EntityKind::Store,
        EntityKind::Table,
        EntityKind::Favorite,
        EntityKind::Reservation,
    ];

    /// Backing SQL table name.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Store => "stores",
            Self::Table => "tables",
            Self::Favorite => "favorites",
            Self::Reservation => "reservations",
        }
    }

    /// Primary key column of the backing table.
    pub fn id_column(self) -> &'static str {
        match self {
            Self::User => "user_id",
            Self::Store => "store_id",
            Self::Table => "table_id",
            Self::Favorite => "favorite_id",
            Self::Reservation => "reservation_id",
        }
    }

    /// Lowercase singular label used in logs and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Store => "store",
            Self::Table => "table",
            Self::Favorite => "favorite",
            Self::Reservation => "reservation",
        }
    }

    /// Parses a singular or plural label (`user`, `users`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| {
            normalized == kind.label() || normalized == kind.table_name()
        })
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
