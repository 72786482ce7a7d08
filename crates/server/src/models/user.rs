//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gymhub_core::{Email, UserId};

/// A registered user. The password hash never leaves the repository.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Public user summary returned by signup and the user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub full_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        }
    }
}
