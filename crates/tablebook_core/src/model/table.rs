//! Dining table record belonging to one store.
//!
//! # Invariants
//! - `table_number` is positive but not unique per store.
//! - `status` keeps unknown labels verbatim (see [`TableStatus::Other`]).

use crate::model::store::StoreId;
use crate::model::validation::{limit_text, require_positive, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type TableId = i64;

pub const TABLE_STATUS_MAX_CHARS: usize = 20;

/// Occupancy label of a table. No transitions are enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Other(String),
}

impl TableStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Folds an `Other` holding a known label into its dedicated variant,
    /// so the value matches what a later read returns.
    pub fn normalized(self) -> Self {
        match self {
            Self::Other(value) => Self::from(value),
            known => known,
        }
    }
}

impl From<String> for TableStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available" => Self::Available,
            "occupied" => Self::Occupied,
            "reserved" => Self::Reserved,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TableStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TableStatus> for String {
    fn from(value: TableStatus) -> Self {
        match value {
            TableStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for TableStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub store_id: StoreId,
    pub table_number: i32,
    pub status: TableStatus,
}

impl Table {
    pub fn validate(&self) -> ValidationResult {
        validate_fields(self.table_number, &self.status)
    }

    pub fn patched(&self, patch: &TablePatch) -> Self {
        let mut next = self.clone();
        if let Some(store_id) = patch.store_id {
            next.store_id = store_id;
        }
        if let Some(table_number) = patch.table_number {
            next.table_number = table_number;
        }
        if let Some(status) = &patch.status {
            next.status = status.clone().normalized();
        }
        next
    }
}

/// Input for creating a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTable {
    pub store_id: StoreId,
    pub table_number: i32,
    pub status: TableStatus,
}

impl NewTable {
    pub fn new(store_id: StoreId, table_number: i32, status: impl Into<TableStatus>) -> Self {
        Self {
            store_id,
            table_number,
            status: status.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_fields(self.table_number, &self.status)
    }

    pub fn into_table(self, id: TableId) -> Table {
        Table {
            id,
            store_id: self.store_id,
            table_number: self.table_number,
            status: self.status.normalized(),
        }
    }
}

/// Partial update for a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TablePatch {
    pub store_id: Option<StoreId>,
    pub table_number: Option<i32>,
    pub status: Option<TableStatus>,
}

fn validate_fields(table_number: i32, status: &TableStatus) -> ValidationResult {
    require_positive("table_number", table_number)?;
    limit_text("status", status.as_str(), TABLE_STATUS_MAX_CHARS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validation::ValidationError;

    #[test]
    fn status_round_trips_through_string() {
        for label in ["available", "occupied", "reserved", "cleaning"] {
            assert_eq!(String::from(TableStatus::from(label)), label);
        }
    }

    #[test]
    fn validate_rejects_non_positive_table_number() {
        let table = NewTable::new(1, 0, "available");
        assert_eq!(
            table.validate(),
            Err(ValidationError::NotPositive {
                field: "table_number",
                value: 0
            })
        );
    }

    #[test]
    fn empty_status_is_kept_as_other_label() {
        let table = NewTable::new(1, 2, "");
        assert_eq!(table.validate(), Ok(()));
        assert_eq!(table.status, TableStatus::Other(String::new()));
    }

    #[test]
    fn known_label_in_other_is_normalized_on_write() {
        let table = NewTable::new(1, 2, TableStatus::Other("reserved".to_string())).into_table(3);
        assert_eq!(table.status, TableStatus::Reserved);

        let patch = TablePatch {
            status: Some(TableStatus::Other("occupied".to_string())),
            ..TablePatch::default()
        };
        assert_eq!(table.patched(&patch).status, TableStatus::Occupied);
    }
}
