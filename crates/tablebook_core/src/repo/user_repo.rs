//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - Passwords are persisted exactly as submitted.
//! - A user referenced by stores, favorites or reservations cannot be deleted.

use crate::model::user::{NewUser, User, UserId, UserPatch, UserRole};
use crate::model::EntityKind;
use crate::repo::{
    delete_restricted, ensure_connection_ready, write_scope, Dependent, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_COLUMNS: &[&str] = &["user_id", "name", "email", "password", "role"];

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    name,
    email,
    password,
    role
FROM users";

const USER_DEPENDENTS: &[Dependent] = &[
    Dependent {
        entity: EntityKind::Store,
        column: "owner_id",
    },
    Dependent {
        entity: EntityKind::Store,
        column: "staff_id",
    },
    Dependent {
        entity: EntityKind::Favorite,
        column: "customer_id",
    },
    Dependent {
        entity: EntityKind::Reservation,
        column: "customer_id",
    },
];

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<User>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn update_user(&self, id: UserId, patch: &UserPatch) -> RepoResult<User>;
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, EntityKind::User, USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (name, email, password, role) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.name.as_str(),
                user.email.as_str(),
                user.password.as_str(),
                user.role.as_str(),
            ],
        )?;

        Ok(user.clone().into_user(self.conn.last_insert_rowid()))
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        load_user(self.conn, id)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY user_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> RepoResult<User> {
        write_scope(self.conn, |conn| {
            let current = load_user(conn, id)?.ok_or(RepoError::NotFound {
                entity: EntityKind::User,
                id,
            })?;
            let next = current.patched(patch);
            next.validate()?;

            conn.execute(
                "UPDATE users
                 SET
                    name = ?1,
                    email = ?2,
                    password = ?3,
                    role = ?4
                 WHERE user_id = ?5;",
                params![
                    next.name.as_str(),
                    next.email.as_str(),
                    next.password.as_str(),
                    next.role.as_str(),
                    id,
                ],
            )?;
            Ok(next)
        })
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        delete_restricted(self.conn, EntityKind::User, id, USER_DEPENDENTS)
    }
}

fn load_user(conn: &Connection, id: UserId) -> RepoResult<Option<User>> {
    let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_user_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("user_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        password: row.get("password")?,
        role: UserRole::from(row.get::<_, String>("role")?),
    })
}
