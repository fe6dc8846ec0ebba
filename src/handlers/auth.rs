//! 认证相关的 HTTP 处理器

use crate::{
    auth::{cookie::build_session_cookie, middleware::AuthContext},
    error::AppError,
    handlers::AppJson,
    middleware::AppState,
    models::auth::*,
};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.auth_service.register(req).await?;

    Ok(Json(response))
}

/// 登录：令牌同时通过响应体和 HttpOnly Cookie 返回
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, AppError> {
    let response = state.auth_service.login(req).await?;

    let cookie = build_session_cookie(
        &state.config.cookie,
        &response.access_token,
        state.jwt_service.ttl_secs(),
    )?;

    Ok(([(header::SET_COOKIE, cookie)], Json(response)).into_response())
}

/// 受保护资源
pub async fn protected(auth_context: AuthContext) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: format!("Hello {}, you accessed a protected route!", auth_context.subject),
    })
}
