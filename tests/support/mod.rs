#![allow(dead_code)]

use std::str::FromStr;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tower::ServiceExt;

use rollcall::config::Config;
use rollcall::database::schema;
use rollcall::models::Role;
use rollcall::services::user_service::{self, CreateUser, UserDto};
use rollcall::state::AppState;
use rollcall::web;

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory database. Capped at one connection: every `:memory:` connection
/// is a separate database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("sqlite options")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect in-memory database");

    schema::init_schema(&pool).await.expect("init schema");
    pool
}

pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let config = Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
    };
    let app = web::router(AppState::new(pool.clone(), &config));
    (app, pool)
}

pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).expect("encode body")))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = app.clone().oneshot(request).await.expect("dispatch");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse response json")
    };
    (status, value)
}

pub async fn seed_user(pool: &SqlitePool, name: &str, identifier: &str, role: Role) -> UserDto {
    user_service::create_user(
        pool,
        CreateUser {
            name: name.to_string(),
            identifier: identifier.to_string(),
            email: None,
            role: Some(role),
        },
    )
    .await
    .expect("seed user")
}

pub async fn login(app: &Router, identifier: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "identifier": identifier })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["accessToken"]
        .as_str()
        .expect("accessToken in login response")
        .to_string()
}

/// Admin + member pair with both tokens, the usual starting point.
pub async fn seed_admin_and_member(
    app: &Router,
    pool: &SqlitePool,
) -> (UserDto, UserDto, String, String) {
    let admin = seed_user(pool, "Admin User", "admin", Role::Admin).await;
    let member = seed_user(pool, "Member User", "member", Role::Member).await;
    let admin_token = login(app, "admin").await;
    let member_token = login(app, "member").await;
    (admin, member, admin_token, member_token)
}
