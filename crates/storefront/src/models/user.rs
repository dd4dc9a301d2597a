//! User account models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use byteshelf_core::{Email, UserId};

/// A registered user account.
///
/// The password hash is deliberately not part of this struct; it is only
/// fetched by the credential lookup in the user repository.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
    pub loyalty_points: i64,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Display name for the user: full name if present, otherwise username.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Data required to insert a new user.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(1),
            username: "jdoe".to_owned(),
            email: Email::parse("jdoe@example.com").unwrap(),
            first_name: None,
            last_name: None,
            is_admin: false,
            loyalty_points: 0,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(sample_user().display_name(), "jdoe");
    }

    #[test]
    fn test_display_name_uses_full_name() {
        let mut user = sample_user();
        user.first_name = Some("Jane".to_owned());
        user.last_name = Some("Doe".to_owned());
        assert_eq!(user.display_name(), "Jane Doe");
    }
}
