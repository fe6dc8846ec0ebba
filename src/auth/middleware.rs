//! Cookie session authentication middleware

use crate::{auth::cookie::extract_cookie, error::AppError, middleware::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Authenticated session (attached to request extensions)
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account email the token was issued for
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}

// Lets handlers take `AuthContext` as an argument
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::MissingToken)
    }
}

/// Require a valid session token in the configured cookie
pub async fn cookie_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_cookie(req.headers(), &state.config.cookie.name).ok_or_else(|| {
        metrics::counter!("auth_protected_total", "outcome" => "missing_token").increment(1);
        AppError::MissingToken
    })?;

    let claims = state.jwt_service.decode(&token).map_err(|e| {
        metrics::counter!("auth_protected_total", "outcome" => "invalid_token").increment(1);
        e
    })?;

    let auth_context = AuthContext {
        expires_at: claims.expires_at(),
        subject: claims.sub,
    };

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
