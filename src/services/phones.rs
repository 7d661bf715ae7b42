use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::database::models::{NewPhone, Phone, PhoneReview, PhoneSummary};
use crate::database::prelude::*;
use crate::types::ListQuery;

use super::error::{ServiceError, ServiceResult};
use super::validation::{ensure_url, provided, provided_num, require};
use super::listing;

#[derive(Debug, Default, Deserialize)]
pub struct PhoneInput {
    pub brand_id: Option<i64>,
    pub model: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub release_date: Option<NaiveDate>,
}

pub struct PhoneService {
    store: Arc<dyn Store>,
}

impl PhoneService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> ServiceResult<Vec<PhoneSummary>> {
        let rows = self.store.list_phones(query).await?;
        listing(rows, query, "phones")
    }

    pub async fn get(&self, id: i64) -> ServiceResult<PhoneSummary> {
        self.store
            .find_phone_summary(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("phone"))
    }

    pub async fn reviews(&self, id: i64) -> ServiceResult<Vec<PhoneReview>> {
        let phone = self.find(id).await?;
        Ok(self.store.list_phone_reviews(phone.id).await?)
    }

    pub async fn create(&self, input: PhoneInput) -> ServiceResult<Phone> {
        let brand_id = provided_num(input.brand_id);
        let model = provided(&input.model);
        let price = provided_num(input.price);
        let image_url = provided(&input.image_url);
        require(&[
            ("brand_id", brand_id.is_some()),
            ("model", model.is_some()),
            ("price", price.is_some()),
            ("image_url", image_url.is_some()),
            ("release_date", input.release_date.is_some()),
        ])?;
        let (Some(brand_id), Some(model), Some(price), Some(image_url), Some(release_date)) =
            (brand_id, model, price, image_url, input.release_date)
        else {
            return Err(ServiceError::validation("phone payload is incomplete"));
        };
        ensure_price(price)?;
        ensure_url("image_url", image_url)?;
        self.ensure_brand(brand_id).await?;

        let phone = self
            .store
            .create_phone(NewPhone {
                brand_id,
                model: model.to_string(),
                price,
                image_url: image_url.to_string(),
                release_date,
            })
            .await?;
        info!(phone_id = phone.id, brand_id, "Phone created");
        Ok(phone)
    }

    pub async fn update(&self, id: i64, input: PhoneInput) -> ServiceResult<Phone> {
        let mut phone = self.find(id).await?;

        if let Some(brand_id) = provided_num(input.brand_id) {
            if brand_id != phone.brand_id {
                self.ensure_brand(brand_id).await?;
                phone.brand_id = brand_id;
            }
        }
        if let Some(model) = provided(&input.model) {
            phone.model = model.to_string();
        }
        if let Some(price) = provided_num(input.price) {
            ensure_price(price)?;
            phone.price = price;
        }
        if let Some(image_url) = provided(&input.image_url) {
            ensure_url("image_url", image_url)?;
            phone.image_url = image_url.to_string();
        }
        if let Some(release_date) = input.release_date {
            phone.release_date = release_date;
        }

        Ok(self.store.update_phone(&phone).await?)
    }

    /// Removes the phone with its specification, reviews and their comments
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.store.delete_phone(id).await? {
            return Err(ServiceError::not_found("phone"));
        }
        info!(phone_id = id, "Phone deleted");
        Ok(())
    }

    pub(crate) async fn find(&self, id: i64) -> ServiceResult<Phone> {
        self.store
            .find_phone(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("phone"))
    }

    async fn ensure_brand(&self, brand_id: i64) -> ServiceResult<()> {
        match self.store.find_brand(brand_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("brand")),
        }
    }
}

fn ensure_price(price: i64) -> ServiceResult<()> {
    if price <= 0 {
        return Err(ServiceError::validation("price must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewReview;
    use crate::testing::TestContext;

    fn input(brand_id: i64) -> PhoneInput {
        PhoneInput {
            brand_id: Some(brand_id),
            model: Some("Rocket 5".into()),
            price: Some(7_999_000),
            image_url: Some("https://cdn.example.com/rocket.png".into()),
            release_date: NaiveDate::from_ymd_opt(2024, 9, 1),
        }
    }

    #[tokio::test]
    async fn create_requires_existing_brand() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = PhoneService::new(ctx.store.clone());

        let err = service.create(input(99)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(m) if m == "brand not found"));

        let acme = ctx.create_brand("Acme").await?;
        let phone = service.create(input(acme.id)).await?;
        let summary = service.get(phone.id).await?;
        assert_eq!(summary.full_name, "Acme Rocket 5");
        assert_eq!(summary.avg_rating, None);
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_every_field() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = PhoneService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;

        let err = service.create(PhoneInput::default()).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(m) if m == "brand_id, model, price, image_url, release_date are required")
        );

        let mut bad_url = input(acme.id);
        bad_url.image_url = Some("rocket.png".into());
        assert!(matches!(service.create(bad_url).await, Err(ServiceError::Validation(_))));

        let mut negative = input(acme.id);
        negative.price = Some(-1);
        assert!(matches!(service.create(negative).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_revalidates_brand_and_keeps_blank_fields() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = PhoneService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        let err = service
            .update(phone.id, PhoneInput { brand_id: Some(42), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let updated = service
            .update(
                phone.id,
                PhoneInput { model: Some("".into()), price: Some(0), ..Default::default() },
            )
            .await?;
        assert_eq!(updated.model, "Rocket");
        assert_eq!(updated.price, phone.price);
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_and_is_not_repeatable() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = PhoneService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;
        let review = ctx
            .store
            .create_review(NewReview { user_id: 1, phone_id: phone.id, rating: 5, content: "great".into() })
            .await?;

        service.delete(phone.id).await?;
        assert!(ctx.store.find_review(review.id).await?.is_none());
        assert!(matches!(service.delete(phone.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.reviews(phone.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
