//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 邮箱已被注册
    #[error("Email already registered")]
    DuplicateEmail,

    /// 账户不存在与密码错误统一为同一种错误，防止账户枚举
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token missing")]
    MissingToken,

    /// 签名无效、格式错误、已过期统一为同一种错误
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed request body: {0}")]
    InvalidBody(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials | AppError::MissingToken | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::DuplicateEmail
            | AppError::InvalidCredentials
            | AppError::MissingToken
            | AppError::InvalidToken => self.to_string(),
            AppError::Validation(msg) | AppError::InvalidBody(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    pub fn validation(errors: &validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Invalid request: {}", errors))
    }
}

/// 错误响应 DTO
///
/// `detail` 保持前端约定的字段名；`request_id` 与响应头 `x-request-id` 一致。
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: u16,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = crate::middleware::current_request_id()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        // 客户端错误属于正常流程，只有服务端错误按 error 记录
        if status.is_server_error() {
            tracing::error!(code = self.code(), message = %self, request_id = %request_id, "Application error");
        } else {
            tracing::debug!(code = self.code(), message = %self, request_id = %request_id, "Request rejected");
        }

        let body = ErrorResponse {
            detail: self.user_message(),
            code: self.code(),
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// 请求体无法解析为 JSON 或缺少字段
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}
