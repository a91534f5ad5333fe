//! `seed`: inserts the demonstration data set in one transaction.

use super::describe;
use chrono::Local;
use log::info;
use std::io::Write;
use tablebook_core::{
    FavoriteRepository, NewFavorite, NewReservation, NewStore, NewTable, NewUser,
    ReservationRepository, Session, StoreRepository, TableRepository, UserRepository,
};

/// Ids of the rows created by one seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededIds {
    pub owner_id: i64,
    pub staff_id: i64,
    pub store_id: i64,
    pub table_id: i64,
    pub favorite_id: i64,
    pub reservation_id: i64,
}

pub fn run(session: &mut Session, out: &mut dyn Write) -> Result<(), String> {
    let ids = seed(session).map_err(|err| describe("seed", err))?;

    writeln!(
        out,
        "seeded owner={} staff={} store={} table={} favorite={} reservation={}",
        ids.owner_id, ids.staff_id, ids.store_id, ids.table_id, ids.favorite_id, ids.reservation_id
    )
    .map_err(|err| err.to_string())?;
    Ok(())
}

pub fn seed(session: &mut Session) -> tablebook_core::RepoResult<SeededIds> {
    let reservation_time = Local::now().naive_local();

    let ids = session.transaction(|uow| {
        let users = uow.users()?;
        let owner = users.create_user(&NewUser::new(
            "John Doe",
            "john.doe@example.com",
            "securepassword",
            "owner",
        ))?;
        let staff = users.create_user(&NewUser::new(
            "Jane Smith",
            "jane.smith@example.com",
            "securepassword",
            "staff",
        ))?;

        let store = uow.stores()?.create_store(&NewStore {
            owner_id: owner.id,
            staff_id: staff.id,
            name: "Store 1".to_string(),
            open_time_booking: "09:00-18:00".to_string(),
            cancel_reserve: "24 hours".to_string(),
        })?;

        let table = uow
            .tables()?
            .create_table(&NewTable::new(store.id, 1, "available"))?;

        let favorite = uow.favorites()?.create_favorite(&NewFavorite {
            customer_id: owner.id,
            store_id: store.id,
        })?;

        let reservation = uow.reservations()?.create_reservation(&NewReservation {
            table_id: table.id,
            number_of_table: 1,
            customer_id: owner.id,
            reservation_time,
            number_of_people: 2,
            customer_name: "John Doe".to_string(),
            customer_phone: "1234567890".to_string(),
        })?;

        Ok(SeededIds {
            owner_id: owner.id,
            staff_id: staff.id,
            store_id: store.id,
            table_id: table.id,
            favorite_id: favorite.id,
            reservation_id: reservation.id,
        })
    })?;

    info!(
        "event=seed module=cli status=ok store_id={} reservation_id={}",
        ids.store_id, ids.reservation_id
    );
    Ok(ids)
}
