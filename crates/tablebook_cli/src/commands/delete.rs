//! `delete`: removes the first row of every entity.
//!
//! The default order (users first) fails on any referenced user under the
//! restrict policy; `--leaves-first` walks dependents before parents.

use super::describe;
use log::info;
use std::io::Write;
use tablebook_core::{
    EntityKind, FavoriteRepository, RepoResult, ReservationRepository, Session, StoreRepository,
    TableRepository, UnitOfWork, UserRepository,
};

pub fn run(session: &Session, leaves_first: bool, out: &mut dyn Write) -> Result<(), String> {
    let mut order = EntityKind::ALL.to_vec();
    if leaves_first {
        order.reverse();
    }

    let unit = session.unit();
    for kind in order {
        let deleted =
            delete_first(&unit, kind).map_err(|err| describe(&format!("delete {kind}"), err))?;
        let line = match deleted {
            Some(id) => format!("deleted {kind} {id}"),
            None => format!("no {kind} rows to delete"),
        };
        writeln!(out, "{line}").map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn delete_first(unit: &UnitOfWork<'_>, kind: EntityKind) -> RepoResult<Option<i64>> {
    let first = match kind {
        EntityKind::User => unit.users()?.list_users()?.first().map(|row| row.id),
        EntityKind::Store => unit.stores()?.list_stores()?.first().map(|row| row.id),
        EntityKind::Table => unit.tables()?.list_tables()?.first().map(|row| row.id),
        EntityKind::Favorite => unit.favorites()?.list_favorites()?.first().map(|row| row.id),
        EntityKind::Reservation => unit
            .reservations()?
            .list_reservations()?
            .first()
            .map(|row| row.id),
    };
    let Some(id) = first else {
        return Ok(None);
    };

    match kind {
        EntityKind::User => unit.users()?.delete_user(id)?,
        EntityKind::Store => unit.stores()?.delete_store(id)?,
        EntityKind::Table => unit.tables()?.delete_table(id)?,
        EntityKind::Favorite => unit.favorites()?.delete_favorite(id)?,
        EntityKind::Reservation => unit.reservations()?.delete_reservation(id)?,
    }

    info!("event=scripted_delete module=cli status=ok entity={kind} id={id}");
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::seed::seed;

    #[test]
    fn default_order_stops_at_referenced_user() {
        let mut session = Session::in_memory().unwrap();
        seed(&mut session).unwrap();
        let mut out = Vec::new();

        let err = run(&session, false, &mut out).unwrap_err();

        assert!(err.starts_with("delete user failed: constraint violation"));
        assert!(out.is_empty());
        let users = session.unit().users().unwrap().list_users().unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn leaves_first_removes_one_row_per_entity() {
        let mut session = Session::in_memory().unwrap();
        let ids = seed(&mut session).unwrap();
        let mut out = Vec::new();

        run(&session, true, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed.lines().collect::<Vec<_>>(),
            vec![
                format!("deleted reservation {}", ids.reservation_id),
                format!("deleted favorite {}", ids.favorite_id),
                format!("deleted table {}", ids.table_id),
                format!("deleted store {}", ids.store_id),
                format!("deleted user {}", ids.owner_id),
            ]
        );
        let remaining = session.unit().users().unwrap().list_users().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, ids.staff_id);
    }
}
