use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Claims;
use crate::config::SecurityConfig;

/// Authenticated admin context extracted from the session token
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            expires_at: claims.expires_at(),
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Find the session token on a request.
///
/// An `Authorization: Bearer` header wins over the session cookie.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header format".to_string())?;
        return extract_bearer_token(auth_str);
    }

    cookie_value(headers, cookie_name)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| "Missing session token".to_string())
}

/// Extract Bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Result<String, String> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| "Authorization header must use Bearer token format".to_string())?
        .trim();

    if token.is_empty() {
        return Err("Empty session token".to_string());
    }
    Ok(token.to_string())
}

/// Read one cookie out of every `Cookie` header on the request
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// `Set-Cookie` value carrying a fresh session
pub fn session_cookie(security: &SecurityConfig, token: &str, max_age_seconds: i64) -> HeaderValue {
    build_cookie(security, token, max_age_seconds)
}

/// `Set-Cookie` value that makes the browser drop the session
pub fn expired_session_cookie(security: &SecurityConfig) -> HeaderValue {
    build_cookie(security, "", 0)
}

fn build_cookie(security: &SecurityConfig, value: &str, max_age_seconds: i64) -> HeaderValue {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        security.cookie_name, value, max_age_seconds
    );
    if security.secure_cookies {
        cookie.push_str("; Secure");
    }
    // A configured cookie name may hold bytes a header cannot carry
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static("folio_session=; Path=/; Max-Age=0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn bearer_header_is_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        headers.insert(header::COOKIE, HeaderValue::from_static("folio_session=cookie-token"));

        assert_eq!(extract_session_token(&headers, "folio_session").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn falls_back_to_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; folio_session=tok123; other=1"));

        assert_eq!(extract_session_token(&headers, "folio_session").unwrap(), "tok123");
    }

    #[test]
    fn missing_or_malformed_tokens_are_errors() {
        assert!(extract_session_token(&HeaderMap::new(), "folio_session").is_err());

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(extract_session_token(&headers, "folio_session").is_err());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("folio_session="));
        assert!(extract_session_token(&headers, "folio_session").is_err());
    }

    #[test]
    fn session_cookie_attributes() {
        let mut security = AppConfig::development().security;
        let cookie = session_cookie(&security, "tok", 3600);
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("folio_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        security.secure_cookies = true;
        let expired = expired_session_cookie(&security);
        let expired = expired.to_str().unwrap();
        assert!(expired.contains("Max-Age=0"));
        assert!(expired.ends_with("Secure"));
    }
}
