//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account row
///
/// The password hash never leaves the server; `serde(skip)` keeps it out of
/// any serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

/// Public profile returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub country: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            country: user.country,
        }
    }
}
