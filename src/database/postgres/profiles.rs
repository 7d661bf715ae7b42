use async_trait::async_trait;

use super::PgStore;
use crate::database::models::{NewProfile, Profile};
use crate::database::{ProfileRepository, StoreError, StoreResult};

const PROFILE_COLUMNS: &str = "id, user_id, full_name, biodata, image_url, birthday, created_at, updated_at";

#[async_trait]
impl ProfileRepository for PgStore {
    async fn find_profile_by_account(&self, user_id: i64) -> StoreResult<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE user_id = $1", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_profile(&self, new: NewProfile) -> StoreResult<Profile> {
        let sql = format!(
            r#"
            INSERT INTO profiles (user_id, full_name, biodata, image_url, birthday)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(new.user_id)
            .bind(&new.full_name)
            .bind(&new.biodata)
            .bind(&new.image_url)
            .bind(new.birthday)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_profile(&self, profile: &Profile) -> StoreResult<Profile> {
        let sql = format!(
            r#"
            UPDATE profiles
            SET full_name = $2, biodata = $3, image_url = $4, birthday = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(profile.id)
            .bind(&profile.full_name)
            .bind(&profile.biodata)
            .bind(&profile.image_url)
            .bind(profile.birthday)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }
}
