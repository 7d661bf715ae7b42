//! Reviews and the comments hanging off them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub phone_id: i64,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: i64,
    pub phone_id: i64,
    pub rating: i32,
    pub content: String,
}

/// Review as listed under a phone
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PhoneReview {
    pub id: i64,
    pub user_id: i64,
    pub phone_id: i64,
    pub username: String,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review as listed in the moderation view
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewListing {
    pub id: i64,
    pub user_id: i64,
    pub phone_id: i64,
    pub username: String,
    pub phone_model: String,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub review_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub review_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub review_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
