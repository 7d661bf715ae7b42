mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use phone_review_api::auth::{Claims, TokenKind};

use common::TestApp;

fn cookie_value(set_cookie: &str) -> Option<&str> {
    set_cookie.split(';').next()?.trim().strip_prefix("refresh_token=")
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app.get("/health", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status_code"], 200);
    assert_eq!(res.body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_echoes_only_username_and_email() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app
        .post(
            "/auth/register",
            None,
            json!({ "username": "alice", "email": "alice@test.com", "password": "s3cret" }),
        )
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.message(), "registration successful");
    assert_eq!(res.body["data"], json!({ "user": { "username": "alice", "email": "alice@test.com" } }));
    assert!(!res.body.to_string().contains("s3cret"));
    Ok(())
}

#[tokio::test]
async fn register_rejects_missing_fields_and_duplicates() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app.post("/auth/register", None, json!({ "username": "bob" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["status_code"], 400);
    assert!(res.body.get("data").is_none());

    app.member_token("bob").await?;
    let res = app
        .post(
            "/auth/register",
            None,
            json!({ "username": "bob", "email": "other@test.com", "password": "secret1" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.message().starts_with("username already exists"));
    Ok(())
}

#[tokio::test]
async fn login_returns_token_and_refresh_cookie() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app
        .post("/auth/login", None, json!({ "username": "user", "password": "user123" }))
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.message(), "login successful");
    assert_eq!(res.body["data"]["user"], json!({ "username": "user", "email": "user@gmail.com" }));
    assert!(res.body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));

    let cookie = res.set_cookie().expect("refresh cookie");
    assert!(cookie.starts_with("refresh_token="));
    assert!(cookie.contains("HttpOnly"));
    Ok(())
}

#[tokio::test]
async fn login_failures_share_one_message() -> Result<()> {
    let app = TestApp::new().await?;

    let wrong_password = app
        .post("/auth/login", None, json!({ "username": "user", "password": "nope" }))
        .await?;
    let unknown_user = app
        .post("/auth/login", None, json!({ "username": "ghost", "password": "nope" }))
        .await?;

    for res in [wrong_password, unknown_user] {
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.message(), "wrong credentials");
        assert!(res.set_cookie().is_none());
    }
    Ok(())
}

#[tokio::test]
async fn refresh_cookie_yields_new_access_token() -> Result<()> {
    let app = TestApp::new().await?;

    let login = app
        .post("/auth/login", None, json!({ "username": "user", "password": "user123" }))
        .await?;
    let refresh = cookie_value(login.set_cookie().expect("refresh cookie"))
        .expect("cookie value")
        .to_string();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/refresh")
        .header(header::COOKIE, format!("refresh_token={}", refresh))
        .body(Body::empty())?;
    let res = app.send(request).await?;
    assert_eq!(res.status, StatusCode::OK);
    let token = res.body["data"]["token"].as_str().expect("token").to_string();

    let role = app.get("/users/role", Some(&token)).await?;
    assert_eq!(role.status, StatusCode::OK);
    assert_eq!(role.body["data"]["role_name"], "user");

    // A refresh token is not an access token
    let res = app.get("/users/role", Some(&refresh)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app.call(Method::POST, "/auth/refresh", None, None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["status_code"], 401);
    Ok(())
}

#[tokio::test]
async fn logout_expires_the_refresh_cookie() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.login("user", "user123").await?;

    let res = app.call(Method::POST, "/auth/logout", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.message(), "logout successful");
    let cookie = res.set_cookie().expect("cleared cookie");
    assert!(cookie.starts_with("refresh_token=;"));
    assert!(cookie.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn missing_garbage_and_expired_tokens_are_rejected() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app.get("/users/role", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.get("/users/role", Some("not-a-jwt")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let now = Utc::now().timestamp();
    let claims = Claims {
        user_id: 1,
        authorized: true,
        kind: TokenKind::Access,
        exp: now - 60,
        iat: now - 3600,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.config.security.api_secret.as_bytes()),
    )?;
    let res = app.get("/users/role", Some(&expired)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["status_code"], 401);
    Ok(())
}

#[tokio::test]
async fn token_query_parameter_is_accepted() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.login("user", "user123").await?;

    let res = app.get(&format!("/users/role?token={}", token), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["role_name"], "user");
    Ok(())
}

#[tokio::test]
async fn change_password_requires_the_current_one() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.member_token("carol").await?;

    let res = app
        .put(
            "/auth/change-password",
            Some(&token),
            json!({ "current_password": "wrong", "new_password": "next-secret" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .put(
            "/auth/change-password",
            Some(&token),
            json!({ "current_password": "secret1", "new_password": "next-secret" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.message(), "password updated successfully");

    assert!(app.login("carol", "secret1").await.is_err());
    app.login("carol", "next-secret").await?;
    Ok(())
}
