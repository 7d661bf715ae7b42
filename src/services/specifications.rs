use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{NewSpecification, Specification};
use crate::database::prelude::*;

use super::error::{ServiceError, ServiceResult};
use super::validation::{provided, provided_num, require};

#[derive(Debug, Default, Deserialize)]
pub struct SpecificationInput {
    pub network: Option<String>,
    pub operating_system: Option<String>,
    pub storage: Option<i32>,
    pub memory: Option<i32>,
    pub camera: Option<i32>,
    pub battery: Option<String>,
    pub additional_feature: Option<String>,
}

pub struct SpecificationService {
    store: Arc<dyn Store>,
}

impl SpecificationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get(&self, phone_id: i64) -> ServiceResult<Specification> {
        self.ensure_phone(phone_id).await?;
        self.store
            .find_specification(phone_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("specification"))
    }

    pub async fn create(&self, phone_id: i64, input: SpecificationInput) -> ServiceResult<Specification> {
        self.ensure_phone(phone_id).await?;

        let network = provided(&input.network);
        let operating_system = provided(&input.operating_system);
        let battery = provided(&input.battery);
        let storage = provided_num(input.storage);
        let memory = provided_num(input.memory);
        let camera = provided_num(input.camera);
        require(&[
            ("network", network.is_some()),
            ("operating_system", operating_system.is_some()),
            ("storage", storage.is_some()),
            ("memory", memory.is_some()),
            ("camera", camera.is_some()),
            ("battery", battery.is_some()),
        ])?;
        let (storage, memory, camera) = (
            storage.unwrap_or_default(),
            memory.unwrap_or_default(),
            camera.unwrap_or_default(),
        );
        ensure_positive("storage", storage)?;
        ensure_positive("memory", memory)?;
        ensure_positive("camera", camera)?;

        if self.store.find_specification(phone_id).await?.is_some() {
            return Err(ServiceError::conflict("specification"));
        }

        let spec = self
            .store
            .create_specification(NewSpecification {
                phone_id,
                network: network.unwrap_or_default().to_string(),
                operating_system: operating_system.unwrap_or_default().to_string(),
                storage,
                memory,
                camera,
                battery: battery.unwrap_or_default().to_string(),
                additional_feature: input.additional_feature.unwrap_or_default(),
            })
            .await?;
        info!(phone_id, spec_id = spec.id, "Specification created");
        Ok(spec)
    }

    pub async fn update(&self, phone_id: i64, input: SpecificationInput) -> ServiceResult<Specification> {
        let mut spec = self.get(phone_id).await?;

        if let Some(v) = provided(&input.network) {
            spec.network = v.to_string();
        }
        if let Some(v) = provided(&input.operating_system) {
            spec.operating_system = v.to_string();
        }
        if let Some(v) = provided(&input.battery) {
            spec.battery = v.to_string();
        }
        if let Some(v) = provided(&input.additional_feature) {
            spec.additional_feature = v.to_string();
        }
        if let Some(v) = provided_num(input.storage) {
            ensure_positive("storage", v)?;
            spec.storage = v;
        }
        if let Some(v) = provided_num(input.memory) {
            ensure_positive("memory", v)?;
            spec.memory = v;
        }
        if let Some(v) = provided_num(input.camera) {
            ensure_positive("camera", v)?;
            spec.camera = v;
        }

        Ok(self.store.update_specification(&spec).await?)
    }

    async fn ensure_phone(&self, phone_id: i64) -> ServiceResult<()> {
        match self.store.find_phone(phone_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("phone")),
        }
    }
}

fn ensure_positive(field: &str, value: i32) -> ServiceResult<()> {
    if value <= 0 {
        return Err(ServiceError::validation(format!("{} must be greater than zero", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn full() -> SpecificationInput {
        SpecificationInput {
            network: Some("5G".into()),
            operating_system: Some("Android 14".into()),
            storage: Some(256),
            memory: Some(12),
            camera: Some(200),
            battery: Some("5000 mAh".into()),
            additional_feature: None,
        }
    }

    #[tokio::test]
    async fn one_specification_per_phone() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = SpecificationService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        let spec = service.create(phone.id, full()).await?;
        assert_eq!(spec.additional_feature, "");
        assert!(matches!(service.create(phone.id, full()).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_phone_or_specification_is_not_found() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = SpecificationService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        let err = service.create(404, full()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(m) if m == "phone not found"));

        let err = service.update(phone.id, full()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(m) if m == "specification not found"));
        Ok(())
    }

    #[tokio::test]
    async fn zero_numbers_are_required_on_create_and_ignored_on_update() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = SpecificationService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        let mut no_storage = full();
        no_storage.storage = Some(0);
        let err = service.create(phone.id, no_storage).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "storage is required"));

        service.create(phone.id, full()).await?;
        let updated = service
            .update(phone.id, SpecificationInput { storage: Some(0), memory: Some(16), ..Default::default() })
            .await?;
        assert_eq!(updated.storage, 256);
        assert_eq!(updated.memory, 16);
        Ok(())
    }

    #[tokio::test]
    async fn negative_sizes_are_rejected() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = SpecificationService::new(ctx.store.clone());
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        let mut negative = full();
        negative.storage = Some(-256);
        let err = service.create(phone.id, negative).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "storage must be greater than zero"));
        assert!(ctx.store.find_specification(phone.id).await?.is_none());

        service.create(phone.id, full()).await?;
        let err = service
            .update(phone.id, SpecificationInput { camera: Some(-1), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "camera must be greater than zero"));
        assert_eq!(service.get(phone.id).await?.camera, 200);
        Ok(())
    }
}
