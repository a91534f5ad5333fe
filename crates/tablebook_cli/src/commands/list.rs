//! `list`: prints entity rows as pretty JSON, ordered by id.

use super::describe;
use serde::Serialize;
use std::io::Write;
use tablebook_core::{
    EntityKind, FavoriteRepository, RepoResult, ReservationRepository, Session, StoreRepository,
    TableRepository, UnitOfWork, UserRepository,
};

pub fn run(
    session: &Session,
    entity: Option<EntityKind>,
    out: &mut dyn Write,
) -> Result<(), String> {
    let kinds = match entity {
        Some(kind) => vec![kind],
        None => EntityKind::ALL.to_vec(),
    };

    let unit = session.unit();
    for kind in kinds {
        let rendered = render(&unit, kind)?;
        writeln!(out, "{}:\n{rendered}", kind.table_name()).map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn render(unit: &UnitOfWork<'_>, kind: EntityKind) -> Result<String, String> {
    let listed: RepoResult<Result<String, String>> = match kind {
        EntityKind::User => unit
            .users()
            .and_then(|repo| repo.list_users())
            .map(|rows| to_json(kind, &rows)),
        EntityKind::Store => unit
            .stores()
            .and_then(|repo| repo.list_stores())
            .map(|rows| to_json(kind, &rows)),
        EntityKind::Table => unit
            .tables()
            .and_then(|repo| repo.list_tables())
            .map(|rows| to_json(kind, &rows)),
        EntityKind::Favorite => unit
            .favorites()
            .and_then(|repo| repo.list_favorites())
            .map(|rows| to_json(kind, &rows)),
        EntityKind::Reservation => unit
            .reservations()
            .and_then(|repo| repo.list_reservations())
            .map(|rows| to_json(kind, &rows)),
    };
    listed.map_err(|err| describe("list", err))?
}

fn to_json<T: Serialize>(kind: EntityKind, rows: &[T]) -> Result<String, String> {
    serde_json::to_string_pretty(rows)
        .map_err(|err| format!("list failed: cannot serialize {}: {err}", kind.table_name()))
}
