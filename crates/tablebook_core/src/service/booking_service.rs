//! Reservation booking use-cases.
//!
//! No availability, capacity or booking-window rules are applied; booking is
//! a validated insert.

use crate::model::reservation::{NewReservation, Reservation, ReservationId, ReservationPatch};
use crate::model::table::TableId;
use crate::model::user::UserId;
use crate::model::EntityKind;
use crate::repo::reservation_repo::ReservationRepository;
use crate::repo::table_repo::TableRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use log::info;

/// Booking request for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub table_id: TableId,
    pub customer_id: UserId,
    pub reservation_time: NaiveDateTime,
    pub number_of_people: i32,
    pub customer_name: String,
    pub customer_phone: String,
    /// Explicit table number; `None` copies the table's current number.
    pub number_of_table: Option<i32>,
}

/// Use-case service wrapper for reservation writes.
pub struct BookingService<T: TableRepository, R: ReservationRepository> {
    tables: T,
    reservations: R,
}

impl<T: TableRepository, R: ReservationRepository> BookingService<T, R> {
    pub fn new(tables: T, reservations: R) -> Self {
        Self {
            tables,
            reservations,
        }
    }

    /// Books a table.
    ///
    /// # Contract
    /// - Fails with `MissingReference` when the table does not exist.
    /// - `number_of_table` is snapshotted at booking time and never
    ///   refreshed afterwards.
    pub fn book(&self, request: &BookingRequest) -> RepoResult<Reservation> {
        let table = self
            .tables
            .get_table(request.table_id)?
            .ok_or(RepoError::MissingReference {
                field: "table_id",
                entity: EntityKind::Table,
                id: request.table_id,
            })?;

        let reservation = self.reservations.create_reservation(&NewReservation {
            table_id: table.id,
            number_of_table: request.number_of_table.unwrap_or(table.table_number),
            customer_id: request.customer_id,
            reservation_time: request.reservation_time,
            number_of_people: request.number_of_people,
            customer_name: request.customer_name.clone(),
            customer_phone: request.customer_phone.clone(),
        })?;

        info!(
            "event=reservation_book module=service status=ok reservation_id={} table_id={}",
            reservation.id, reservation.table_id
        );
        Ok(reservation)
    }

    /// Changes the party size of an existing reservation.
    pub fn change_party_size(
        &self,
        id: ReservationId,
        number_of_people: i32,
    ) -> RepoResult<Reservation> {
        self.reservations.update_reservation(
            id,
            &ReservationPatch {
                number_of_people: Some(number_of_people),
                ..ReservationPatch::default()
            },
        )
    }

    /// Moves an existing reservation to another time.
    pub fn reschedule(
        &self,
        id: ReservationId,
        reservation_time: NaiveDateTime,
    ) -> RepoResult<Reservation> {
        self.reservations.update_reservation(
            id,
            &ReservationPatch {
                reservation_time: Some(reservation_time),
                ..ReservationPatch::default()
            },
        )
    }
}
