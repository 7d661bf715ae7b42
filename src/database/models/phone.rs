use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Phone {
    pub id: i64,
    pub brand_id: i64,
    pub model: String,
    pub price: i64,
    pub image_url: String,
    pub release_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPhone {
    pub brand_id: i64,
    pub model: String,
    pub price: i64,
    pub image_url: String,
    pub release_date: NaiveDate,
}

/// Phone joined with its brand and review aggregate
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PhoneSummary {
    pub id: i64,
    pub brand_id: i64,
    pub brand_name: String,
    pub full_name: String,
    pub model: String,
    pub price: i64,
    pub image_url: String,
    pub release_date: NaiveDate,
    /// Mean rating rounded to two decimals; null while unreviewed
    pub avg_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PhoneSummary {
    pub fn full_name(brand_name: &str, model: &str) -> String {
        format!("{} {}", brand_name, model)
    }

    pub fn round_rating(avg: f64) -> f64 {
        (avg * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Specification {
    pub id: i64,
    pub phone_id: i64,
    pub network: String,
    pub operating_system: String,
    pub storage: i32,
    pub memory: i32,
    pub camera: i32,
    pub battery: String,
    pub additional_feature: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSpecification {
    pub phone_id: i64,
    pub network: String,
    pub operating_system: String,
    pub storage: i32,
    pub memory: i32,
    pub camera: i32,
    pub battery: String,
    pub additional_feature: String,
}
