use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{Brand, NewBrand, PhoneSummary};
use crate::database::prelude::*;
use crate::database::StoreError;
use crate::types::ListQuery;

use super::error::{ServiceError, ServiceResult};
use super::validation::{ensure_url, provided, require};
use super::listing;

#[derive(Debug, Default, Deserialize)]
pub struct BrandInput {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
}

pub struct BrandService {
    store: Arc<dyn Store>,
}

impl BrandService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> ServiceResult<Vec<Brand>> {
        let rows = self.store.list_brands(query).await?;
        listing(rows, query, "brands")
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Brand> {
        self.store
            .find_brand(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("brand"))
    }

    pub async fn phones(&self, id: i64) -> ServiceResult<Vec<PhoneSummary>> {
        let brand = self.get(id).await?;
        Ok(self.store.list_brand_phones(brand.id).await?)
    }

    pub async fn create(&self, input: BrandInput) -> ServiceResult<Brand> {
        let name = provided(&input.name);
        let logo_url = provided(&input.logo_url);
        require(&[("name", name.is_some()), ("logo_url", logo_url.is_some())])?;
        let (name, logo_url) = (name.unwrap_or_default(), logo_url.unwrap_or_default());
        ensure_url("logo_url", logo_url)?;

        if self.store.find_brand_by_name(name).await?.is_some() {
            return Err(ServiceError::conflict("brand"));
        }

        let brand = self
            .store
            .create_brand(NewBrand {
                name: name.to_string(),
                logo_url: logo_url.to_string(),
                description: input.description.unwrap_or_default(),
            })
            .await?;
        info!(brand_id = brand.id, name = %brand.name, "Brand created");
        Ok(brand)
    }

    /// Partial update; the name is re-checked only against other brands
    pub async fn update(&self, id: i64, input: BrandInput) -> ServiceResult<Brand> {
        let mut brand = self.get(id).await?;

        if let Some(logo_url) = provided(&input.logo_url) {
            ensure_url("logo_url", logo_url)?;
            brand.logo_url = logo_url.to_string();
        }
        if let Some(name) = provided(&input.name) {
            if name != brand.name && self.store.find_brand_by_name(name).await?.is_some() {
                return Err(ServiceError::conflict("brand"));
            }
            brand.name = name.to_string();
        }
        if let Some(description) = provided(&input.description) {
            brand.description = description.to_string();
        }

        Ok(self.store.update_brand(&brand).await?)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let brand = self.get(id).await?;

        match self.store.delete_brand(id).await {
            Ok(true) => {
                info!(brand_id = id, "Brand deleted");
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found("brand")),
            Err(StoreError::ForeignKeyViolation(_)) => Err(ServiceError::InUse(format!(
                "brand {} cannot be deleted because phones still reference it",
                brand.name
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn input(name: &str, logo_url: &str) -> BrandInput {
        BrandInput {
            name: Some(name.into()),
            logo_url: Some(logo_url.into()),
            description: Some("Flagships".into()),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = BrandService::new(ctx.store.clone());

        let created = service.create(input("Acme", "https://cdn.acme.com/logo.png")).await?;
        let fetched = service.get(created.id).await?;
        assert_eq!(fetched.name, "Acme");
        assert_eq!(fetched.logo_url, "https://cdn.acme.com/logo.png");
        assert_eq!(fetched.description, "Flagships");
        Ok(())
    }

    #[tokio::test]
    async fn logo_url_must_satisfy_url_policy() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = BrandService::new(ctx.store.clone());

        for bad in ["ftp://cdn.acme.com/logo.png", "https://localhost/logo.png", "logo.png"] {
            let err = service.create(input("Acme", bad)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(m) if m == "logo_url must be a valid url"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_are_reported_together() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = BrandService::new(ctx.store.clone());

        let err = service.create(BrandInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "name, logo_url are required"));
        Ok(())
    }

    #[tokio::test]
    async fn rename_checks_other_brands_only() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = BrandService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        ctx.create_brand("Globex").await?;

        let same = service
            .update(acme.id, BrandInput { name: Some("Acme".into()), ..Default::default() })
            .await?;
        assert_eq!(same.name, "Acme");
        assert_eq!(same.logo_url, acme.logo_url);

        let err = service
            .update(acme.id, BrandInput { name: Some("Globex".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_refused_while_phones_reference_brand() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = BrandService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        ctx.create_phone(&acme, "Rocket").await?;

        let err = service.delete(acme.id).await.unwrap_err();
        assert!(matches!(&err, ServiceError::InUse(m) if m.contains("Acme")));
        assert!(service.get(acme.id).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn filtered_listing_without_matches_is_empty_result() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = BrandService::new(ctx.store.clone());

        assert!(service.list(&ListQuery::all()).await?.is_empty());

        let query = ListQuery { search: Some("zzz".into()), filtered: true, ..Default::default() };
        assert!(matches!(service.list(&query).await, Err(ServiceError::EmptyResult(_))));
        Ok(())
    }
}
