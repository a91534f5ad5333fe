//! `update`: patches the first row of every entity.
//!
//! Entities without rows are skipped.

use super::describe;
use log::info;
use std::io::Write;
use tablebook_core::{
    EntityKind, FavoritePatch, FavoriteRepository, ReservationPatch, ReservationRepository,
    RepoResult, Session, StorePatch, StoreRepository, TablePatch, TableRepository, TableStatus,
    UnitOfWork, UserId, UserPatch, UserRepository,
};

pub fn run(
    session: &Session,
    favorite_customer: UserId,
    out: &mut dyn Write,
) -> Result<(), String> {
    let unit = session.unit();
    for kind in EntityKind::ALL {
        let updated = update_first(&unit, kind, favorite_customer)
            .map_err(|err| describe(&format!("update {kind}"), err))?;
        let line = match updated {
            Some(id) => format!("updated {kind} {id}"),
            None => format!("no {kind} rows to update"),
        };
        writeln!(out, "{line}").map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn update_first(
    unit: &UnitOfWork<'_>,
    kind: EntityKind,
    favorite_customer: UserId,
) -> RepoResult<Option<i64>> {
    let updated = match kind {
        EntityKind::User => {
            let repo = unit.users()?;
            match repo.list_users()?.first() {
                Some(user) => {
                    let patch = UserPatch {
                        name: Some("Jane Doe".to_string()),
                        ..UserPatch::default()
                    };
                    Some(repo.update_user(user.id, &patch)?.id)
                }
                None => None,
            }
        }
        EntityKind::Store => {
            let repo = unit.stores()?;
            match repo.list_stores()?.first() {
                Some(store) => {
                    let patch = StorePatch {
                        name: Some("Updated Store".to_string()),
                        ..StorePatch::default()
                    };
                    Some(repo.update_store(store.id, &patch)?.id)
                }
                None => None,
            }
        }
        EntityKind::Table => {
            let repo = unit.tables()?;
            match repo.list_tables()?.first() {
                Some(table) => {
                    let patch = TablePatch {
                        status: Some(TableStatus::Occupied),
                        ..TablePatch::default()
                    };
                    Some(repo.update_table(table.id, &patch)?.id)
                }
                None => None,
            }
        }
        EntityKind::Favorite => {
            let repo = unit.favorites()?;
            match repo.list_favorites()?.first() {
                Some(favorite) => {
                    let patch = FavoritePatch {
                        customer_id: Some(favorite_customer),
                        ..FavoritePatch::default()
                    };
                    Some(repo.update_favorite(favorite.id, &patch)?.id)
                }
                None => None,
            }
        }
        EntityKind::Reservation => {
            let repo = unit.reservations()?;
            match repo.list_reservations()?.first() {
                Some(reservation) => {
                    let patch = ReservationPatch {
                        number_of_people: Some(4),
                        ..ReservationPatch::default()
                    };
                    Some(repo.update_reservation(reservation.id, &patch)?.id)
                }
                None => None,
            }
        }
    };

    if let Some(id) = updated {
        info!("event=scripted_update module=cli status=ok entity={kind} id={id}");
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::seed::seed;
    use tablebook_core::RepoError;

    #[test]
    fn update_applies_scripted_changes() {
        let mut session = Session::in_memory().unwrap();
        let ids = seed(&mut session).unwrap();
        let mut out = Vec::new();

        run(&session, ids.staff_id, &mut out).unwrap();

        let unit = session.unit();
        let user = unit.users().unwrap().get_user(ids.owner_id).unwrap().unwrap();
        assert_eq!(user.name, "Jane Doe");
        let store = unit.stores().unwrap().get_store(ids.store_id).unwrap().unwrap();
        assert_eq!(store.name, "Updated Store");
        let table = unit.tables().unwrap().get_table(ids.table_id).unwrap().unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        let favorite = unit
            .favorites()
            .unwrap()
            .get_favorite(ids.favorite_id)
            .unwrap()
            .unwrap();
        assert_eq!(favorite.customer_id, ids.staff_id);
        let reservation = unit
            .reservations()
            .unwrap()
            .get_reservation(ids.reservation_id)
            .unwrap()
            .unwrap();
        assert_eq!(reservation.number_of_people, 4);
        assert_eq!(reservation.customer_name, "John Doe");
    }

    #[test]
    fn update_on_empty_database_skips_every_entity() {
        let session = Session::in_memory().unwrap();
        let mut out = Vec::new();

        run(&session, 2, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 5);
        assert!(printed.lines().all(|line| line.starts_with("no ")));
    }

    #[test]
    fn update_with_unknown_favorite_customer_fails_fast() {
        let mut session = Session::in_memory().unwrap();
        let ids = seed(&mut session).unwrap();
        let unit = session.unit();

        let err = update_first(&unit, EntityKind::Favorite, 99).unwrap_err();
        assert!(matches!(err, RepoError::MissingReference { id: 99, .. }));
        let favorite = unit
            .favorites()
            .unwrap()
            .get_favorite(ids.favorite_id)
            .unwrap()
            .unwrap();
        assert_eq!(favorite.customer_id, ids.owner_id);
    }
}
