use async_trait::async_trait;

use super::PgStore;
use crate::database::models::{Brand, NewBrand, NewPhone, NewSpecification, Phone, PhoneSummary, Specification};
use crate::database::{BrandRepository, PhoneRepository, SpecificationRepository, StoreError, StoreResult};
use crate::types::ListQuery;

const BRAND_COLUMNS: &str = "id, name, logo_url, description, created_at, updated_at";
const PHONE_COLUMNS: &str = "id, brand_id, model, price, image_url, release_date, created_at, updated_at";
const SPEC_COLUMNS: &str = "id, phone_id, network, operating_system, storage, memory, camera, battery, additional_feature, created_at, updated_at";

/// Phone joined with brand name and rounded mean rating; callers append WHERE/GROUP BY
const PHONE_SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.brand_id, b.name AS brand_name, b.name || ' ' || p.model AS full_name,
           p.model, p.price, p.image_url, p.release_date,
           ROUND(AVG(r.rating)::numeric, 2)::float8 AS avg_rating,
           p.created_at, p.updated_at
    FROM phones p
    JOIN brands b ON b.id = p.brand_id
    LEFT JOIN reviews r ON r.phone_id = p.id
"#;

#[async_trait]
impl BrandRepository for PgStore {
    async fn list_brands(&self, query: &ListQuery) -> StoreResult<Vec<Brand>> {
        let sql = format!(
            "SELECT {} FROM brands WHERE name ILIKE $1 ORDER BY id {}",
            BRAND_COLUMNS,
            query.order_sql()
        );
        Ok(sqlx::query_as::<_, Brand>(&sql)
            .bind(query.like_pattern())
            .fetch_all(self.pool())
            .await?)
    }

    async fn find_brand(&self, id: i64) -> StoreResult<Option<Brand>> {
        let sql = format!("SELECT {} FROM brands WHERE id = $1", BRAND_COLUMNS);
        Ok(sqlx::query_as::<_, Brand>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_brand_by_name(&self, name: &str) -> StoreResult<Option<Brand>> {
        let sql = format!("SELECT {} FROM brands WHERE name = $1", BRAND_COLUMNS);
        Ok(sqlx::query_as::<_, Brand>(&sql)
            .bind(name)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_brand(&self, new: NewBrand) -> StoreResult<Brand> {
        let sql = format!(
            "INSERT INTO brands (name, logo_url, description) VALUES ($1, $2, $3) RETURNING {}",
            BRAND_COLUMNS
        );
        Ok(sqlx::query_as::<_, Brand>(&sql)
            .bind(&new.name)
            .bind(&new.logo_url)
            .bind(&new.description)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_brand(&self, brand: &Brand) -> StoreResult<Brand> {
        let sql = format!(
            "UPDATE brands SET name = $2, logo_url = $3, description = $4, updated_at = NOW() WHERE id = $1 RETURNING {}",
            BRAND_COLUMNS
        );
        sqlx::query_as::<_, Brand>(&sql)
            .bind(brand.id)
            .bind(&brand.name)
            .bind(&brand.logo_url)
            .bind(&brand.description)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_brand(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PhoneRepository for PgStore {
    async fn list_phones(&self, query: &ListQuery) -> StoreResult<Vec<PhoneSummary>> {
        let sql = format!(
            "{} WHERE (b.name || ' ' || p.model) ILIKE $1 GROUP BY p.id, b.name ORDER BY p.id {}",
            PHONE_SUMMARY_SELECT,
            query.order_sql()
        );
        Ok(sqlx::query_as::<_, PhoneSummary>(&sql)
            .bind(query.like_pattern())
            .fetch_all(self.pool())
            .await?)
    }

    async fn list_brand_phones(&self, brand_id: i64) -> StoreResult<Vec<PhoneSummary>> {
        let sql = format!(
            "{} WHERE p.brand_id = $1 GROUP BY p.id, b.name ORDER BY p.id",
            PHONE_SUMMARY_SELECT
        );
        Ok(sqlx::query_as::<_, PhoneSummary>(&sql)
            .bind(brand_id)
            .fetch_all(self.pool())
            .await?)
    }

    async fn find_phone(&self, id: i64) -> StoreResult<Option<Phone>> {
        let sql = format!("SELECT {} FROM phones WHERE id = $1", PHONE_COLUMNS);
        Ok(sqlx::query_as::<_, Phone>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_phone_summary(&self, id: i64) -> StoreResult<Option<PhoneSummary>> {
        let sql = format!("{} WHERE p.id = $1 GROUP BY p.id, b.name", PHONE_SUMMARY_SELECT);
        Ok(sqlx::query_as::<_, PhoneSummary>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_phone(&self, new: NewPhone) -> StoreResult<Phone> {
        let sql = format!(
            "INSERT INTO phones (brand_id, model, price, image_url, release_date) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            PHONE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Phone>(&sql)
            .bind(new.brand_id)
            .bind(&new.model)
            .bind(new.price)
            .bind(&new.image_url)
            .bind(new.release_date)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_phone(&self, phone: &Phone) -> StoreResult<Phone> {
        let sql = format!(
            r#"
            UPDATE phones
            SET brand_id = $2, model = $3, price = $4, image_url = $5, release_date = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PHONE_COLUMNS
        );
        sqlx::query_as::<_, Phone>(&sql)
            .bind(phone.id)
            .bind(phone.brand_id)
            .bind(&phone.model)
            .bind(phone.price)
            .bind(&phone.image_url)
            .bind(phone.release_date)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_phone(&self, id: i64) -> StoreResult<bool> {
        // specifications, reviews and comments go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM phones WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SpecificationRepository for PgStore {
    async fn find_specification(&self, phone_id: i64) -> StoreResult<Option<Specification>> {
        let sql = format!("SELECT {} FROM specifications WHERE phone_id = $1", SPEC_COLUMNS);
        Ok(sqlx::query_as::<_, Specification>(&sql)
            .bind(phone_id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_specification(&self, new: NewSpecification) -> StoreResult<Specification> {
        let sql = format!(
            r#"
            INSERT INTO specifications
                (phone_id, network, operating_system, storage, memory, camera, battery, additional_feature)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            SPEC_COLUMNS
        );
        Ok(sqlx::query_as::<_, Specification>(&sql)
            .bind(new.phone_id)
            .bind(&new.network)
            .bind(&new.operating_system)
            .bind(new.storage)
            .bind(new.memory)
            .bind(new.camera)
            .bind(&new.battery)
            .bind(&new.additional_feature)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_specification(&self, spec: &Specification) -> StoreResult<Specification> {
        let sql = format!(
            r#"
            UPDATE specifications
            SET network = $2, operating_system = $3, storage = $4, memory = $5, camera = $6,
                battery = $7, additional_feature = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SPEC_COLUMNS
        );
        sqlx::query_as::<_, Specification>(&sql)
            .bind(spec.id)
            .bind(&spec.network)
            .bind(&spec.operating_system)
            .bind(spec.storage)
            .bind(spec.memory)
            .bind(spec.camera)
            .bind(&spec.battery)
            .bind(&spec.additional_feature)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }
}
