//! Reservation repository contract and SQLite implementation.
//!
//! # Invariants
//! - `table_id` and `customer_id` must reference existing rows on create/update.
//! - `number_of_table` and the customer snapshot fields are stored verbatim;
//!   they are never recomputed from the referenced table or user.
//! - `reservation_time` is persisted as canonical timestamp text.

use crate::model::reservation::{NewReservation, Reservation, ReservationId, ReservationPatch};
use crate::model::validation::{format_timestamp, parse_timestamp};
use crate::model::EntityKind;
use crate::repo::{
    delete_restricted, ensure_connection_ready, ensure_reference, write_scope, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const RESERVATION_COLUMNS: &[&str] = &[
    "reservation_id",
    "table_id",
    "number_of_table",
    "customer_id",
    "reservation_time",
    "number_of_people",
    "customer_name",
    "customer_phone",
];

const RESERVATION_SELECT_SQL: &str = "SELECT
    reservation_id,
    table_id,
    number_of_table,
    customer_id,
    reservation_time,
    number_of_people,
    customer_name,
    customer_phone
FROM reservations";

/// Repository interface for reservation CRUD operations.
pub trait ReservationRepository {
    fn create_reservation(&self, reservation: &NewReservation) -> RepoResult<Reservation>;
    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;
    fn list_reservations(&self) -> RepoResult<Vec<Reservation>>;
    fn update_reservation(
        &self,
        id: ReservationId,
        patch: &ReservationPatch,
    ) -> RepoResult<Reservation>;
    fn delete_reservation(&self, id: ReservationId) -> RepoResult<()>;
}

/// SQLite-backed reservation repository.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, EntityKind::Reservation, RESERVATION_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn create_reservation(&self, reservation: &NewReservation) -> RepoResult<Reservation> {
        reservation.validate()?;

        write_scope(self.conn, |conn| {
            ensure_reference(conn, "table_id", EntityKind::Table, reservation.table_id)?;
            ensure_reference(conn, "customer_id", EntityKind::User, reservation.customer_id)?;

            conn.execute(
                "INSERT INTO reservations (
                    table_id,
                    number_of_table,
                    customer_id,
                    reservation_time,
                    number_of_people,
                    customer_name,
                    customer_phone
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    reservation.table_id,
                    reservation.number_of_table,
                    reservation.customer_id,
                    format_timestamp(&reservation.reservation_time),
                    reservation.number_of_people,
                    reservation.customer_name.as_str(),
                    reservation.customer_phone.as_str(),
                ],
            )?;

            Ok(reservation
                .clone()
                .into_reservation(conn.last_insert_rowid()))
        })
    }

    fn get_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        load_reservation(self.conn, id)
    }

    fn list_reservations(&self) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL} ORDER BY reservation_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(parse_reservation_row(row)?);
        }
        Ok(reservations)
    }

    fn update_reservation(
        &self,
        id: ReservationId,
        patch: &ReservationPatch,
    ) -> RepoResult<Reservation> {
        write_scope(self.conn, |conn| {
            let current = load_reservation(conn, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::Reservation,
                id,
            })?;
            let next = current.patched(patch);
            next.validate()?;

            if let Some(table_id) = patch.table_id {
                ensure_reference(conn, "table_id", EntityKind::Table, table_id)?;
            }
            if let Some(customer_id) = patch.customer_id {
                ensure_reference(conn, "customer_id", EntityKind::User, customer_id)?;
            }

            conn.execute(
                "UPDATE reservations
                 SET
                    table_id = ?1,
                    number_of_table = ?2,
                    customer_id = ?3,
                    reservation_time = ?4,
                    number_of_people = ?5,
                    customer_name = ?6,
                    customer_phone = ?7
                 WHERE reservation_id = ?8;",
                params![
                    next.table_id,
                    next.number_of_table,
                    next.customer_id,
                    format_timestamp(&next.reservation_time),
                    next.number_of_people,
                    next.customer_name.as_str(),
                    next.customer_phone.as_str(),
                    id,
                ],
            )?;
            Ok(next)
        })
    }

    fn delete_reservation(&self, id: ReservationId) -> RepoResult<()> {
        delete_restricted(self.conn, EntityKind::Reservation, id, &[])
    }
}

fn load_reservation(conn: &Connection, id: ReservationId) -> RepoResult<Option<Reservation>> {
    let mut stmt = conn.prepare(&format!(
        "{RESERVATION_SELECT_SQL} WHERE reservation_id = ?1;"
    ))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_reservation_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_reservation_row(row: &Row<'_>) -> RepoResult<Reservation> {
    let time_text: String = row.get("reservation_time")?;
    let reservation_time = parse_timestamp("reservation_time", &time_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{time_text}` in reservations.reservation_time"
        ))
    })?;

    Ok(Reservation {
        id: row.get("reservation_id")?,
        table_id: row.get("table_id")?,
        number_of_table: row.get("number_of_table")?,
        customer_id: row.get("customer_id")?,
        reservation_time,
        number_of_people: row.get("number_of_people")?,
        customer_name: row.get("customer_name")?,
        customer_phone: row.get("customer_phone")?,
    })
}
