use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::account_error;
use crate::api::payload::RegisterPayload;
use crate::auth::accounts::create_account;
use crate::database::models::UserInfo;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Operation;
use crate::validation::Validate;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserInfo,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> ApiResult<RegisterResponse> {
    if !state.config.security.allow_registration {
        return Err(ApiError::forbidden("Registration is disabled"));
    }

    let Json(payload) = payload?;
    let registration = payload.validate()?;

    let user = create_account(state.store.as_ref(), &state.config.security, registration)
        .await
        .map_err(|e| account_error(Operation::Create, e))?;

    tracing::info!(user_id = %user.id, email = %user.email, "admin account registered");
    Ok(ApiResponse::created(RegisterResponse {
        message: "User created successfully".to_string(),
        user: UserInfo::from(&user),
    }))
}
