//! Store record with its owner and staff references.

use crate::model::user::UserId;
use crate::model::validation::{require_text, ValidationResult};
use serde::{Deserialize, Serialize};

pub type StoreId = i64;

pub const STORE_NAME_MAX_CHARS: usize = 255;
pub const STORE_OPEN_TIME_BOOKING_MAX_CHARS: usize = 255;
pub const STORE_CANCEL_RESERVE_MAX_CHARS: usize = 255;

/// Persisted store row.
///
/// `open_time_booking` and `cancel_reserve` are free-text descriptors
/// (e.g. `"09:00-18:00"`, `"24 hours"`), not parsed schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub owner_id: UserId,
    pub staff_id: UserId,
    pub name: String,
    pub open_time_booking: String,
    pub cancel_reserve: String,
}

impl Store {
    pub fn validate(&self) -> ValidationResult {
        validate_fields(&self.name, &self.open_time_booking, &self.cancel_reserve)
    }

    /// Returns a copy with the present patch fields applied.
    pub fn patched(&self, patch: &StorePatch) -> Self {
        let mut next = self.clone();
        if let Some(owner_id) = patch.owner_id {
            next.owner_id = owner_id;
        }
        if let Some(staff_id) = patch.staff_id {
            next.staff_id = staff_id;
        }
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(open_time_booking) = &patch.open_time_booking {
            next.open_time_booking = open_time_booking.clone();
        }
        if let Some(cancel_reserve) = &patch.cancel_reserve {
            next.cancel_reserve = cancel_reserve.clone();
        }
        next
    }
}

/// Input for creating a store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStore {
    pub owner_id: UserId,
    pub staff_id: UserId,
    pub name: String,
    pub open_time_booking: String,
    pub cancel_reserve: String,
}

impl NewStore {
    pub fn validate(&self) -> ValidationResult {
        validate_fields(&self.name, &self.open_time_booking, &self.cancel_reserve)
    }

    pub fn into_store(self, id: StoreId) -> Store {
        Store {
            id,
            owner_id: self.owner_id,
            staff_id: self.staff_id,
            name: self.name,
            open_time_booking: self.open_time_booking,
            cancel_reserve: self.cancel_reserve,
        }
    }
}

/// Partial update for a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorePatch {
    pub owner_id: Option<UserId>,
    pub staff_id: Option<UserId>,
    pub name: Option<String>,
    pub open_time_booking: Option<String>,
    pub cancel_reserve: Option<String>,
}

fn validate_fields(name: &str, open_time_booking: &str, cancel_reserve: &str) -> ValidationResult {
    require_text("name", name, STORE_NAME_MAX_CHARS)?;
    require_text(
        "open_time_booking",
        open_time_booking,
        STORE_OPEN_TIME_BOOKING_MAX_CHARS,
    )?;
    require_text("cancel_reserve", cancel_reserve, STORE_CANCEL_RESERVE_MAX_CHARS)?;
    Ok(())
}
