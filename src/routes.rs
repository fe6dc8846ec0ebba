//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{config::CorsConfig, error::AppError, handlers, middleware::AppState};

/// 请求体上限
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Result<Router, AppError> {
    let cors = cors_layer(&state.config.cors)?;

    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 认证路由（无需认证）
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // 需要 Cookie 会话的路由
    let authenticated_routes = Router::new()
        .route("/protected", get(handlers::auth::protected))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::cookie_auth_middleware,
        ));

    Ok(Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state))
}

/// 跨域策略：只允许一个前端来源，并允许携带凭据
fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(&config.allowed_origin).map_err(|e| {
        AppError::Config(format!("Invalid CORS origin {}: {}", config.allowed_origin, e))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
