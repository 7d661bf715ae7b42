use std::sync::Arc;

use crate::auth::cookie::RefreshCookie;
use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::prelude::Store;
use crate::services::{
    AccountService, BrandService, CommentService, DashboardService, PhoneService, ProfileService,
    ReviewService, RoleService, SpecificationService,
};

/// Shared handles built once at startup and cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService, config: AppConfig) -> Self {
        Self {
            store,
            tokens,
            config: Arc::new(config),
        }
    }

    pub fn refresh_cookie(&self) -> RefreshCookie {
        RefreshCookie::new(
            self.config.security.secure_cookies,
            self.tokens.refresh_lifespan().num_seconds(),
        )
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.store.clone())
    }

    pub fn roles(&self) -> RoleService {
        RoleService::new(self.store.clone())
    }

    pub fn brands(&self) -> BrandService {
        BrandService::new(self.store.clone())
    }

    pub fn phones(&self) -> PhoneService {
        PhoneService::new(self.store.clone())
    }

    pub fn specifications(&self) -> SpecificationService {
        SpecificationService::new(self.store.clone())
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.store.clone())
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.store.clone())
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.store.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.store.clone())
    }
}
