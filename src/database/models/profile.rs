use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

pub const DEFAULT_PROFILE_IMAGE: &str = "https://i.ibb.co.com/XjBCcsL/user-1.png";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub biodata: String,
    pub image_url: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub user_id: i64,
    pub full_name: String,
    pub biodata: String,
    pub image_url: String,
    pub birthday: Option<NaiveDate>,
}
