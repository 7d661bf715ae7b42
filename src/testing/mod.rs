use std::sync::Arc;

use chrono::NaiveDate;

use crate::database::models::{Account, Brand, NewAccount, NewBrand, NewPhone, Phone};
use crate::database::models::role::USER_ROLE_ID;
use crate::database::prelude::*;
use crate::database::{seed, MemoryStore};

/// Seeded in-memory store plus shortcuts for building fixtures
pub struct TestContext {
    pub store: Arc<dyn Store>,
}

impl TestContext {
    /// Store with the `user`/`admin` roles and seed accounts (ids 1 and 2)
    pub async fn new() -> anyhow::Result<Self> {
        let store = MemoryStore::new();
        seed::seed(&store).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Plain member account; the password hash is a placeholder
    pub async fn create_member(&self, username: &str) -> anyhow::Result<Account> {
        let account = self
            .store
            .create_account(NewAccount {
                username: username.to_string(),
                email: format!("{}@test.com", username),
                password_hash: "$argon2id$placeholder".to_string(),
                role_id: USER_ROLE_ID,
            })
            .await?;
        Ok(account)
    }

    pub async fn create_brand(&self, name: &str) -> anyhow::Result<Brand> {
        let brand = self
            .store
            .create_brand(NewBrand {
                name: name.to_string(),
                logo_url: format!("https://cdn.example.com/{}.png", name.to_lowercase()),
                description: format!("{} phones", name),
            })
            .await?;
        Ok(brand)
    }

    pub async fn create_phone(&self, brand: &Brand, model: &str) -> anyhow::Result<Phone> {
        let phone = self
            .store
            .create_phone(NewPhone {
                brand_id: brand.id,
                model: model.to_string(),
                price: 4_999_000,
                image_url: "https://cdn.example.com/phone.png".to_string(),
                release_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            })
            .await?;
        Ok(phone)
    }
}
