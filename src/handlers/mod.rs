//! HTTP 处理器模块

pub mod auth;
pub mod health;

use crate::error::AppError;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;

/// JSON 请求体提取器
///
/// 与 `axum::Json` 相同，但解析失败时返回 `AppError`，响应体保持统一格式。
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}
