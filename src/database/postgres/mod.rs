//! sqlx/PostgreSQL implementation of the repository traits.

mod accounts;
mod catalog;
mod content;
mod profiles;

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::DashboardCounts;
use super::{DashboardRepository, Store, StoreResult};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DashboardRepository for PgStore {
    async fn count_all(&self) -> StoreResult<DashboardCounts> {
        let (users, admins, phones, brands, reviews) = sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id WHERE LOWER(r.name) <> 'admin'),
                (SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id WHERE LOWER(r.name) = 'admin'),
                (SELECT COUNT(*) FROM phones),
                (SELECT COUNT(*) FROM brands),
                (SELECT COUNT(*) FROM reviews)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardCounts { users, admins, phones, brands, reviews })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
