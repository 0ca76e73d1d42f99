use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use super::auth::{extract_session_token, AuthUser};
use crate::auth::validate_jwt;
use crate::error::ApiError;
use crate::state::AppState;

/// Authorization requirement for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Admin,
}

const PUBLIC_READ_PREFIXES: [&str; 2] = ["/api/projects", "/api/skills"];
const CONTACT_PATH: &str = "/api/contact";
const ADMIN_UI_PATH: &str = "/admin";
const ADMIN_LOGIN_PATH: &str = "/admin/login";
const SESSION_PATH: &str = "/api/auth/session";

/// Classify a request purely by method and path
pub fn classify(method: &Method, path: &str) -> Access {
    let path = normalize(path);

    if PUBLIC_READ_PREFIXES.iter().any(|prefix| under(path, prefix)) {
        return if *method == Method::GET || *method == Method::HEAD {
            Access::Public
        } else {
            Access::Admin
        };
    }

    if under(path, CONTACT_PATH) {
        // Submitting the contact form is the only anonymous write
        return if *method == Method::POST && path == CONTACT_PATH {
            Access::Public
        } else {
            Access::Admin
        };
    }

    if path == ADMIN_LOGIN_PATH {
        return Access::Public;
    }

    if under(path, ADMIN_UI_PATH) || path == SESSION_PATH {
        return Access::Admin;
    }

    Access::Public
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// `path` is `prefix` itself or a child segment of it
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Route guard applied once to the whole router.
///
/// Admin-only requests must carry a valid session token; the decoded user is
/// injected as an [`AuthUser`] extension for handlers that want it. Rejections
/// happen here, before any handler runs.
pub async fn route_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response, ApiError> {
    let access = classify(request.method(), request.uri().path());
    if access == Access::Public {
        return Ok(next.run(request).await);
    }

    let security = &state.config.security;

    let token = extract_session_token(request.headers(), &security.cookie_name).map_err(|msg| {
        tracing::debug!(path = %request.uri().path(), "rejected admin request: {}", msg);
        ApiError::unauthorized("Unauthorized")
    })?;

    let claims = validate_jwt(&token, &security.jwt_secret).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "rejected admin request: {}", e);
        ApiError::unauthorized("Unauthorized")
    })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!(user = %auth_user.email, path = %request.uri().path(), "admin request authorized");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
