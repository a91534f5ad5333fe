#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tablebook_core::db::open_db_in_memory;
use tablebook_core::{
    NewFavorite, NewReservation, NewStore, NewTable, NewUser, SqliteFavoriteRepository,
    SqliteReservationRepository, SqliteStoreRepository, SqliteTableRepository,
    SqliteUserRepository, Store, StoreRepository, Table, TableRepository, User, UserRepository,
};

pub fn conn() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn users(conn: &Connection) -> SqliteUserRepository<'_> {
    SqliteUserRepository::try_new(conn).unwrap()
}

pub fn stores(conn: &Connection) -> SqliteStoreRepository<'_> {
    SqliteStoreRepository::try_new(conn).unwrap()
}

pub fn tables(conn: &Connection) -> SqliteTableRepository<'_> {
    SqliteTableRepository::try_new(conn).unwrap()
}

pub fn favorites(conn: &Connection) -> SqliteFavoriteRepository<'_> {
    SqliteFavoriteRepository::try_new(conn).unwrap()
}

pub fn reservations(conn: &Connection) -> SqliteReservationRepository<'_> {
    SqliteReservationRepository::try_new(conn).unwrap()
}

pub fn john() -> NewUser {
    NewUser::new("John Doe", "john.doe@example.com", "securepassword", "owner")
}

pub fn jane() -> NewUser {
    NewUser::new("Jane Smith", "jane.smith@example.com", "securepassword", "staff")
}

pub fn new_store(owner: &User, staff: &User) -> NewStore {
    NewStore {
        owner_id: owner.id,
        staff_id: staff.id,
        name: "Store 1".to_string(),
        open_time_booking: "09:00-18:00".to_string(),
        cancel_reserve: "24 hours".to_string(),
    }
}

pub fn dinner_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(19, 30, 0))
        .unwrap()
}

pub fn new_reservation(table: &Table, customer: &User) -> NewReservation {
    NewReservation {
        table_id: table.id,
        number_of_table: table.table_number,
        customer_id: customer.id,
        reservation_time: dinner_time(),
        number_of_people: 2,
        customer_name: "John Doe".to_string(),
        customer_phone: "1234567890".to_string(),
    }
}

/// Owner, staff, one store and one available table.
pub struct Fixture {
    pub owner: User,
    pub staff: User,
    pub store: Store,
    pub table: Table,
}

pub fn seed(conn: &Connection) -> Fixture {
    let owner = users(conn).create_user(&john()).unwrap();
    let staff = users(conn).create_user(&jane()).unwrap();
    let store = stores(conn)
        .create_store(&new_store(&owner, &staff))
        .unwrap();
    let table = tables(conn)
        .create_table(&NewTable::new(store.id, 1, "available"))
        .unwrap();
    Fixture {
        owner,
        staff,
        store,
        table,
    }
}

pub fn favorite_for(fixture: &Fixture) -> NewFavorite {
    NewFavorite {
        customer_id: fixture.owner.id,
        store_id: fixture.store.id,
    }
}

pub fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
