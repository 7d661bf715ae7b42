#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use phone_review_api::auth::TokenService;
use phone_review_api::config::AppConfig;
use phone_review_api::database::prelude::Store;
use phone_review_api::database::{seed, MemoryStore};
use phone_review_api::routes;
use phone_review_api::state::AppState;

/// Full router over a freshly seeded in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn Store>,
    pub config: AppConfig,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::for_tests();
        let store = MemoryStore::new();
        seed::seed(&store).await?;
        let store: Arc<dyn Store> = Arc::new(store);

        let tokens = TokenService::from_config(&config.security)?;
        let router = routes::router(AppState::new(store.clone(), tokens, config.clone()));
        Ok(Self { router, store, config })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| {
                format!("response body is not JSON: {}", String::from_utf8_lossy(&bytes))
            })?
        };
        Ok(TestResponse { status, headers, body })
    }

    pub async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.call(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.call(Method::DELETE, uri, token, None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let res = self
            .post("/auth/login", None, json!({ "username": username, "password": password }))
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.body);
        res.body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.login("admin", "admin").await
    }

    /// Registers `username` with password `secret1` and returns an access token
    pub async fn member_token(&self, username: &str) -> Result<String> {
        let res = self
            .post(
                "/auth/register",
                None,
                json!({
                    "username": username,
                    "email": format!("{}@test.com", username),
                    "password": "secret1",
                }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "register failed: {}", res.body);
        self.login(username, "secret1").await
    }

    pub async fn create_brand(&self, admin: &str, name: &str) -> Result<i64> {
        let res = self
            .post(
                "/brands",
                Some(admin),
                json!({
                    "name": name,
                    "logo_url": format!("https://cdn.example.com/{}.png", name.to_lowercase()),
                    "description": format!("{} phones", name),
                }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "brand create failed: {}", res.body);
        res.body["data"]["id"].as_i64().context("brand id missing")
    }

    pub async fn create_phone(&self, admin: &str, brand_id: i64, model: &str) -> Result<i64> {
        let res = self
            .post(
                "/phones",
                Some(admin),
                json!({
                    "brand_id": brand_id,
                    "model": model,
                    "price": 4_999_000,
                    "image_url": "https://cdn.example.com/phone.png",
                    "release_date": "2024-03-01",
                }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "phone create failed: {}", res.body);
        res.body["data"]["id"].as_i64().context("phone id missing")
    }
}
