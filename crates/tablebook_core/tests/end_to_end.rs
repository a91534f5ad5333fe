mod common;

use common::*;
use tablebook_core::{
    FavoriteRepository, NewFavorite, NewReservation, NewTable, ReservationRepository, Session,
    StoreRepository, TableRepository, TableStatus, UserRepository, UserRole,
};

#[test]
fn scripted_insert_links_every_entity() {
    let session = Session::in_memory().unwrap();
    let unit = session.unit();

    let john = unit.users().unwrap().create_user(&john()).unwrap();
    let jane = unit.users().unwrap().create_user(&jane()).unwrap();
    let store = unit
        .stores()
        .unwrap()
        .create_store(&new_store(&john, &jane))
        .unwrap();
    let table = unit
        .tables()
        .unwrap()
        .create_table(&NewTable::new(store.id, 1, "available"))
        .unwrap();
    let favorite = unit
        .favorites()
        .unwrap()
        .create_favorite(&NewFavorite {
            customer_id: john.id,
            store_id: store.id,
        })
        .unwrap();
    let reservation = unit
        .reservations()
        .unwrap()
        .create_reservation(&NewReservation {
            table_id: table.id,
            number_of_table: 1,
            customer_id: john.id,
            reservation_time: dinner_time(),
            number_of_people: 2,
            customer_name: "John Doe".to_string(),
            customer_phone: "1234567890".to_string(),
        })
        .unwrap();

    let users = unit.users().unwrap().list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "John Doe");
    assert_eq!(users[0].role, UserRole::Owner);
    assert_eq!(users[1].name, "Jane Smith");
    assert_eq!(users[1].role, UserRole::Staff);

    let stores = unit.stores().unwrap().list_stores().unwrap();
    assert_eq!(stores, vec![store.clone()]);
    assert_eq!(stores[0].owner_id, john.id);
    assert_eq!(stores[0].staff_id, jane.id);
    assert_eq!(stores[0].open_time_booking, "09:00-18:00");
    assert_eq!(stores[0].cancel_reserve, "24 hours");

    let tables = unit.tables().unwrap().list_tables().unwrap();
    assert_eq!(tables, vec![table.clone()]);
    assert_eq!(tables[0].store_id, store.id);
    assert_eq!(tables[0].table_number, 1);
    assert_eq!(tables[0].status, TableStatus::Available);

    let favorites = unit.favorites().unwrap().list_favorites().unwrap();
    assert_eq!(favorites, vec![favorite]);
    assert_eq!(favorites[0].customer_id, john.id);
    assert_eq!(favorites[0].store_id, store.id);

    let reservations = unit.reservations().unwrap().list_reservations().unwrap();
    assert_eq!(reservations, vec![reservation]);
    assert_eq!(reservations[0].table_id, table.id);
    assert_eq!(reservations[0].customer_id, john.id);
    assert_eq!(reservations[0].number_of_people, 2);
    assert_eq!(reservations[0].customer_name, "John Doe");
    assert_eq!(reservations[0].customer_phone, "1234567890");
}

#[test]
fn listings_serialize_without_passwords() {
    let conn = conn();
    let fixture = seed(&conn);
    let reservation = reservations(&conn)
        .create_reservation(&new_reservation(&fixture.table, &fixture.owner))
        .unwrap();

    let user_json = serde_json::to_value(&fixture.owner).unwrap();
    assert_eq!(user_json["role"], "owner");
    assert!(user_json.get("password").is_none());

    let table_json = serde_json::to_value(&fixture.table).unwrap();
    assert_eq!(table_json["status"], "available");

    let reservation_json = serde_json::to_value(&reservation).unwrap();
    assert_eq!(reservation_json["number_of_people"], 2);
    assert_eq!(reservation_json["reservation_time"], "2024-06-01T19:30:00");
}
