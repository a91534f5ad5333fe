//! User record: owners, staff and customers share one table.
//!
//! # Invariants
//! - `role` keeps any legacy free-text label verbatim (see [`UserRole::Other`]).
//! - `password` is stored exactly as submitted and never appears in `Debug`
//!   output or serialized listings.

use crate::model::validation::{limit_text, require_text, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type UserId = i64;

pub const USER_NAME_MAX_CHARS: usize = 255;
pub const USER_EMAIL_MAX_CHARS: usize = 255;
pub const USER_PASSWORD_MAX_CHARS: usize = 255;
pub const USER_ROLE_MAX_CHARS: usize = 20;

const REDACTED: &str = "<redacted>";

/// Role label of a user.
///
/// Known labels map to dedicated variants; anything else is preserved as
/// `Other` so values accepted by the loose schema are never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Owner,
    Staff,
    Customer,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Owner => "owner",
            Self::Staff => "staff",
            Self::Customer => "customer",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Folds an `Other` holding a known label into its dedicated variant,
    /// so the value matches what a later read returns.
    pub fn normalized(self) -> Self {
        match self {
            Self::Other(value) => Self::from(value),
            known => known,
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "owner" => Self::Owner,
            "staff" => Self::Staff,
            "customer" => Self::Customer,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted user row.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: UserRole,
}

impl User {
    /// Validates every column of this row.
    pub fn validate(&self) -> ValidationResult {
        validate_fields(&self.name, &self.email, &self.password, &self.role)
    }

    /// Returns a copy with the present patch fields applied.
    pub fn patched(&self, patch: &UserPatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(email) = &patch.email {
            next.email = email.clone();
        }
        if let Some(password) = &patch.password {
            next.password = password.clone();
        }
        if let Some(role) = &patch.role {
            next.role = role.clone().normalized();
        }
        next
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

/// Input for creating a user.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<UserRole>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_fields(&self.name, &self.email, &self.password, &self.role)
    }

    /// Builds the persisted row once storage has assigned `id`.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role.normalized(),
        }
    }
}

impl Debug for NewUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

/// Partial update for a user. `None` leaves the column unchanged.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl Debug for UserPatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPatch")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("role", &self.role)
            .finish()
    }
}

fn validate_fields(name: &str, email: &str, password: &str, role: &UserRole) -> ValidationResult {
    require_text("name", name, USER_NAME_MAX_CHARS)?;
    require_text("email", email, USER_EMAIL_MAX_CHARS)?;
    require_text("password", password, USER_PASSWORD_MAX_CHARS)?;
    limit_text("role", role.as_str(), USER_ROLE_MAX_CHARS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validation::ValidationError;

    #[test]
    fn role_keeps_unknown_labels_verbatim() {
        assert_eq!(UserRole::from("owner"), UserRole::Owner);
        assert_eq!(UserRole::from("Owner"), UserRole::Other("Owner".to_string()));
        assert_eq!(String::from(UserRole::from("manager")), "manager");
    }

    #[test]
    fn debug_output_redacts_password() {
        let user = NewUser::new("John Doe", "john@example.com", "hunter2", "owner");
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn validate_rejects_role_longer_than_column() {
        let user = NewUser::new("a", "b", "c", "a-role-label-that-is-way-too-long");
        assert!(matches!(
            user.validate(),
            Err(ValidationError::TooLong { field: "role", max_chars: 20, .. })
        ));
    }

    #[test]
    fn patched_touches_only_present_fields() {
        let user = NewUser::new("John", "john@example.com", "pw", "owner").into_user(7);
        let patch = UserPatch {
            name: Some("Jane Doe".to_string()),
            ..UserPatch::default()
        };
        let next = user.patched(&patch);
        assert_eq!(next.name, "Jane Doe");
        assert_eq!(next.email, user.email);
        assert_eq!(next.password, user.password);
        assert_eq!(next.role, user.role);
        assert_eq!(next.id, 7);
    }

    #[test]
    fn empty_role_passes_validation() {
        let user = NewUser::new("A", "a@example.com", "pw", "");
        assert_eq!(user.validate(), Ok(()));
        assert_eq!(user.role, UserRole::Other(String::new()));
    }

    #[test]
    fn other_holding_known_label_reads_back_as_known_variant() {
        let user = NewUser::new("A", "a@example.com", "pw", UserRole::Other("owner".to_string()))
            .into_user(1);
        assert_eq!(user.role, UserRole::Owner);
        assert_eq!(UserRole::from(String::from(user.role.clone())), user.role);
    }
}
