use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

pub const USER_ROLE_ID: i64 = 1;
pub const ADMIN_ROLE_ID: i64 = 2;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// The seeded `user` and `admin` roles cannot be renamed or removed
    pub fn is_reserved(id: i64) -> bool {
        id == USER_ROLE_ID || id == ADMIN_ROLE_ID
    }
}
