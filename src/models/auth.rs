//! Authentication-related models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token type reported alongside every issued access token
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Login request
///
/// Deliberately unvalidated: any bad input must end up as `InvalidCredentials`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register / login response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
}

impl AuthResponse {
    pub fn bearer(message: impl Into<String>, access_token: String) -> Self {
        Self {
            message: message.into(),
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// Protected resource response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectedResponse {
    pub message: String,
}
