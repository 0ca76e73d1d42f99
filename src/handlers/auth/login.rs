use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{account_error, auth_error};
use crate::api::payload::LoginPayload;
use crate::auth::{accounts::authenticate, accounts::AccountError, issue_session};
use crate::database::models::UserInfo;
use crate::error::ApiError;
use crate::middleware::auth::{expired_session_cookie, session_cookie};
use crate::middleware::{ApiResponse, Message};
use crate::state::AppState;
use crate::types::Operation;
use crate::validation::Validate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the session expires
    pub expires_in: i64,
    pub user: UserInfo,
}

/// POST /api/auth/login
///
/// The token is returned in the body for API clients and set as an HttpOnly
/// cookie for the admin UI.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let credentials = payload.validate()?;
    let email = credentials.email.clone();

    let user = match authenticate(state.store.as_ref(), credentials).await {
        Ok(user) => user,
        Err(AccountError::InvalidCredentials) => {
            tracing::warn!(email = %email, "login rejected");
            return Err(ApiError::unauthorized("Invalid email or password"));
        }
        Err(e) => return Err(account_error(Operation::Select, e)),
    };

    let security = &state.config.security;
    let session = issue_session(&user, security).map_err(auth_error)?;
    let cookie = session_cookie(security, &session.token, session.ttl_seconds);

    tracing::info!(user_id = %user.id, "admin logged in");
    let body = LoginResponse {
        token: session.token,
        expires_in: session.ttl_seconds,
        user: UserInfo::from(&user),
    };
    Ok(([(header::SET_COOKIE, cookie)], ApiResponse::success(body)).into_response())
}

/// POST /api/auth/logout
///
/// Sessions are stateless tokens, so logging out clears the cookie; a copied
/// bearer token stays valid until it expires.
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = expired_session_cookie(&state.config.security);
    (
        [(header::SET_COOKIE, cookie)],
        ApiResponse::success(Message::new("Logged out successfully")),
    )
        .into_response()
}
