//! 测试公共模块
//! 提供测试辅助函数和测试工具

#![allow(dead_code)]

use account_gate::{
    config::{
        AppConfig, CookieConfig, CorsConfig, DatabaseConfig, LoggingConfig, SecurityConfig,
        ServerConfig,
    },
    middleware::AppState,
    repository::{AccountStore, MemoryAccountStore},
    routes,
};
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_ORIGIN: &str = "https://frontend.example.com";
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: std::env::var("TEST_DATABASE_URL").ok().map(Secret::new),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new(TEST_SECRET.to_string()),
            access_token_exp_secs: 300,
            // 测试使用低开销参数
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        },
        cookie: CookieConfig {
            name: "access_token".to_string(),
            secure: true,
        },
        cors: CorsConfig {
            allowed_origin: TEST_ORIGIN.to_string(),
        },
    }
}

/// 创建测试应用状态（内存存储）
pub fn create_test_app_state() -> Arc<AppState> {
    create_test_app_state_with(create_test_config(), Arc::new(MemoryAccountStore::new()))
}

pub fn create_test_app_state_with(
    config: AppConfig,
    accounts: Arc<dyn AccountStore>,
) -> Arc<AppState> {
    Arc::new(AppState::new(config, accounts).expect("Failed to build app state"))
}

pub fn create_test_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).expect("Failed to build router")
}

/// 发送 JSON POST 请求
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// 发送 GET 请求，可附带 Cookie 头
pub async fn get_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// 取出 Set-Cookie 中的 `name=value` 部分
pub fn session_cookie_pair(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|s| s.trim().to_string())
}

/// 注册并断言成功
pub async fn register_ok(app: &Router, email: &str, password: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/register",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}
