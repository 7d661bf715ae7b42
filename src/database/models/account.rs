use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Seeded administrator that can never be deleted
pub const RESERVED_ADMIN_ID: i64 = 2;

/// Row of the `users` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC hash; never serialized
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i64,
}

/// Public view of an account used by listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AccountSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// What the authorization gate needs to know about a caller
#[derive(Debug, Clone, FromRow)]
pub struct AccountIdentity {
    pub id: i64,
    pub username: String,
    pub role_name: String,
}
