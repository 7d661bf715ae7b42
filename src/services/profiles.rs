use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::database::models::profile::DEFAULT_PROFILE_IMAGE;
use crate::database::models::{NewProfile, Profile};
use crate::database::prelude::*;

use super::error::{ServiceError, ServiceResult};
use super::validation::{ensure_url, provided, require};

#[derive(Debug, Default, Deserialize)]
pub struct ProfileInput {
    pub full_name: Option<String>,
    pub biodata: Option<String>,
    pub image_url: Option<String>,
    pub birthday: Option<NaiveDate>,
}

pub struct ProfileService {
    store: Arc<dyn Store>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get(&self, account_id: i64) -> ServiceResult<Profile> {
        self.store
            .find_profile_by_account(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("profile"))
    }

    pub async fn create(&self, account_id: i64, input: ProfileInput) -> ServiceResult<Profile> {
        let full_name = provided(&input.full_name);
        require(&[("full_name", full_name.is_some())])?;
        let image_url = match provided(&input.image_url) {
            Some(url) => {
                ensure_url("image_url", url)?;
                url.to_string()
            }
            None => DEFAULT_PROFILE_IMAGE.to_string(),
        };

        if self.store.find_profile_by_account(account_id).await?.is_some() {
            return Err(ServiceError::conflict("profile"));
        }

        let profile = self
            .store
            .create_profile(NewProfile {
                user_id: account_id,
                full_name: full_name.unwrap_or_default().to_string(),
                biodata: input.biodata.unwrap_or_default(),
                image_url,
                birthday: input.birthday,
            })
            .await?;
        info!(profile_id = profile.id, account_id, "Profile created");
        Ok(profile)
    }

    pub async fn update(&self, account_id: i64, input: ProfileInput) -> ServiceResult<Profile> {
        let mut profile = self.get(account_id).await?;

        if let Some(url) = provided(&input.image_url) {
            ensure_url("image_url", url)?;
            profile.image_url = url.to_string();
        }
        if let Some(full_name) = provided(&input.full_name) {
            profile.full_name = full_name.to_string();
        }
        if let Some(biodata) = provided(&input.biodata) {
            profile.biodata = biodata.to_string();
        }
        if input.birthday.is_some() {
            profile.birthday = input.birthday;
        }

        Ok(self.store.update_profile(&profile).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn named(full_name: &str) -> ProfileInput {
        ProfileInput { full_name: Some(full_name.into()), ..Default::default() }
    }

    #[tokio::test]
    async fn create_defaults_image_and_allows_one_per_account() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ProfileService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;

        let profile = service.create(alice.id, named("Alice Liddell")).await?;
        assert_eq!(profile.image_url, DEFAULT_PROFILE_IMAGE);
        assert_eq!(profile.birthday, None);

        let err = service.create(alice.id, named("Again")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_name_and_image() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ProfileService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;

        let err = service.create(alice.id, ProfileInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "full_name is required"));

        let input = ProfileInput { image_url: Some("me.png".into()), ..named("Alice") };
        assert!(matches!(service.create(alice.id, input).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_is_partial_and_requires_existing_profile() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ProfileService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;

        let err = service.update(alice.id, named("Alice")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        service
            .create(alice.id, ProfileInput { biodata: Some("reader".into()), ..named("Alice") })
            .await?;
        let updated = service
            .update(
                alice.id,
                ProfileInput {
                    full_name: Some("".into()),
                    birthday: NaiveDate::from_ymd_opt(1990, 5, 4),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(updated.full_name, "Alice");
        assert_eq!(updated.biodata, "reader");
        assert_eq!(updated.birthday, NaiveDate::from_ymd_opt(1990, 5, 4));
        Ok(())
    }
}
