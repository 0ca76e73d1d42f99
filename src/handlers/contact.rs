use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::IdQuery;
use crate::api::payload::ContactPayload;
use crate::database::models::Contact;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;
use crate::types::{Operation, Resource};
use crate::validation::Validate;

/// POST /api/contact - public contact form submission
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> ApiResult<Contact> {
    let Json(payload) = payload?;
    let contact = payload.validate()?;

    let created = state
        .store
        .create_contact(contact)
        .await
        .map_err(|e| ApiError::persistence(Operation::Create, Resource::Contact, e))?;

    tracing::info!(id = %created.id, "contact request received");
    Ok(ApiResponse::created(created))
}

/// GET /api/contact - every message, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Contact>> {
    let contacts = state
        .store
        .list_contacts()
        .await
        .map_err(|e| ApiError::persistence_list(Resource::Contact, e))?;

    Ok(ApiResponse::success(contacts))
}

/// DELETE /api/contact/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Message> {
    remove(&state, &id).await
}

/// DELETE /api/contact?id=X
pub async fn delete_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    let id = query.require(Resource::Contact)?;
    remove(&state, &id).await
}

async fn remove(state: &AppState, id: &str) -> ApiResult<Message> {
    state
        .store
        .delete_contact(id)
        .await
        .map_err(|e| ApiError::persistence(Operation::Delete, Resource::Contact, e))?;

    tracing::info!(id = %id, "contact request deleted");
    Ok(ApiResponse::success(Message::new("Contact request deleted successfully")))
}
