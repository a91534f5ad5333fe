//! Reservation record.
//!
//! # Invariants
//! - `number_of_table` is a denormalized copy, never checked against
//!   `Table::table_number` after it is stored.
//! - `customer_name` / `customer_phone` are point-in-time snapshots and stay
//!   independent of the referenced user row.
//! - `reservation_time` carries no timezone.

use crate::model::table::TableId;
use crate::model::user::UserId;
use crate::model::validation::{require_positive, require_text, ValidationResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type ReservationId = i64;

pub const CUSTOMER_NAME_MAX_CHARS: usize = 100;
pub const CUSTOMER_PHONE_MAX_CHARS: usize = 20;

/// Persisted reservation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub table_id: TableId,
    pub number_of_table: i32,
    pub customer_id: UserId,
    pub reservation_time: NaiveDateTime,
    pub number_of_people: i32,
    pub customer_name: String,
    pub customer_phone: String,
}

impl Reservation {
    pub fn validate(&self) -> ValidationResult {
        validate_fields(
            self.number_of_people,
            &self.customer_name,
            &self.customer_phone,
        )
    }

    pub fn patched(&self, patch: &ReservationPatch) -> Self {
        let mut next = self.clone();
        if let Some(table_id) = patch.table_id {
            next.table_id = table_id;
        }
        if let Some(number_of_table) = patch.number_of_table {
            next.number_of_table = number_of_table;
        }
        if let Some(customer_id) = patch.customer_id {
            next.customer_id = customer_id;
        }
        if let Some(reservation_time) = patch.reservation_time {
            next.reservation_time = reservation_time;
        }
        if let Some(number_of_people) = patch.number_of_people {
            next.number_of_people = number_of_people;
        }
        if let Some(customer_name) = &patch.customer_name {
            next.customer_name = customer_name.clone();
        }
        if let Some(customer_phone) = &patch.customer_phone {
            next.customer_phone = customer_phone.clone();
        }
        next
    }
}

/// Input for creating a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewReservation {
    pub table_id: TableId,
    pub number_of_table: i32,
    pub customer_id: UserId,
    pub reservation_time: NaiveDateTime,
    pub number_of_people: i32,
    pub customer_name: String,
    pub customer_phone: String,
}

impl NewReservation {
    pub fn validate(&self) -> ValidationResult {
        validate_fields(
            self.number_of_people,
            &self.customer_name,
            &self.customer_phone,
        )
    }

    pub fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            table_id: self.table_id,
            number_of_table: self.number_of_table,
            customer_id: self.customer_id,
            reservation_time: self.reservation_time,
            number_of_people: self.number_of_people,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
        }
    }
}

/// Partial update for a reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReservationPatch {
    pub table_id: Option<TableId>,
    pub number_of_table: Option<i32>,
    pub customer_id: Option<UserId>,
    pub reservation_time: Option<NaiveDateTime>,
    pub number_of_people: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

fn validate_fields(
    number_of_people: i32,
    customer_name: &str,
    customer_phone: &str,
) -> ValidationResult {
    require_positive("number_of_people", number_of_people)?;
    require_text("customer_name", customer_name, CUSTOMER_NAME_MAX_CHARS)?;
    require_text("customer_phone", customer_phone, CUSTOMER_PHONE_MAX_CHARS)?;
    Ok(())
}
