//! Session cookie transport

use crate::{config::CookieConfig, error::AppError};
use axum::http::{header, HeaderMap, HeaderValue};

/// Build the `Set-Cookie` value carrying the access token.
///
/// `SameSite=None` is only honoured by browsers together with `Secure`, so an
/// insecure (plain HTTP) deployment falls back to `SameSite=Lax`.
pub fn build_session_cookie(
    config: &CookieConfig,
    token: &str,
    max_age_secs: u64,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        config.name, token, max_age_secs
    );

    if config.secure {
        cookie.push_str("; Secure; SameSite=None");
    } else {
        cookie.push_str("; SameSite=Lax");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))
}

/// Read a cookie by name from the request `Cookie` headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
