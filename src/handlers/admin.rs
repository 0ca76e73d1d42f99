// handlers/admin.rs - Admin panel data

use axum::extract::State;
use serde::Serialize;

use crate::database::models::Contact;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Resource;

const RECENT_MESSAGES: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub project_count: usize,
    pub skill_count: usize,
    pub message_count: usize,
    pub recent_messages: Vec<Contact>,
}

/// GET /admin/dashboard - table counts and the latest contact messages
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Dashboard> {
    let store = &state.store;

    let projects = store
        .list_projects()
        .await
        .map_err(|e| ApiError::persistence_list(Resource::Project, e))?;
    let skills = store
        .list_skills()
        .await
        .map_err(|e| ApiError::persistence_list(Resource::Skill, e))?;
    let mut messages = store
        .list_contacts()
        .await
        .map_err(|e| ApiError::persistence_list(Resource::Contact, e))?;

    let message_count = messages.len();
    messages.truncate(RECENT_MESSAGES);

    Ok(ApiResponse::success(Dashboard {
        project_count: projects.len(),
        skill_count: skills.len(),
        message_count,
        recent_messages: messages,
    }))
}
