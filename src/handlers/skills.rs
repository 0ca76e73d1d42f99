use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};

use super::IdQuery;
use crate::api::payload::{SkillPatch, SkillPayload, SkillReplace};
use crate::database::models::{Skill, SkillChanges};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;
use crate::types::{Operation, Resource};
use crate::validation::Validate;

/// GET /api/skills - all skills newest first, or one with `?id=`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    if let Some(id) = query.id {
        return Ok(find(&state, &id).await?.into_response());
    }

    let skills = state
        .store
        .list_skills()
        .await
        .map_err(|e| ApiError::persistence_list(Resource::Skill, e))?;

    Ok(ApiResponse::success(skills).into_response())
}

/// GET /api/skills/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Skill> {
    find(&state, &id).await
}

/// POST /api/skills
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SkillPayload>, JsonRejection>,
) -> ApiResult<Skill> {
    let Json(payload) = payload?;
    let skill = payload.validate()?;

    let created = state
        .store
        .create_skill(skill)
        .await
        .map_err(|e| ApiError::persistence(Operation::Create, Resource::Skill, e))?;

    tracing::info!(id = %created.id, name = %created.name, level = created.level, "skill created");
    Ok(ApiResponse::created(created))
}

/// PUT /api/skills?id=X - full update (image optional)
pub async fn replace_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<SkillPayload>, JsonRejection>,
) -> ApiResult<Skill> {
    let Query(query) = query?;
    let id = query.require(Resource::Skill)?;
    let Json(payload) = payload?;
    update(&state, &id, SkillReplace(payload).validate()?).await
}

/// PATCH /api/skills?id=X - full update, same rules as PUT
pub async fn patch_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<SkillPayload>, JsonRejection>,
) -> ApiResult<Skill> {
    let Query(query) = query?;
    let id = query.require(Resource::Skill)?;
    let Json(payload) = payload?;
    update(&state, &id, SkillReplace(payload).validate()?).await
}

/// DELETE /api/skills?id=X
pub async fn delete_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    let id = query.require(Resource::Skill)?;
    remove(&state, &id).await
}

/// PUT /api/skills/:id
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SkillPayload>, JsonRejection>,
) -> ApiResult<Skill> {
    let Json(payload) = payload?;
    update(&state, &id, SkillReplace(payload).validate()?).await
}

/// PATCH /api/skills/:id - partial update
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SkillPayload>, JsonRejection>,
) -> ApiResult<Skill> {
    let Json(payload) = payload?;
    update(&state, &id, SkillPatch(payload).validate()?).await
}

/// DELETE /api/skills/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Message> {
    remove(&state, &id).await
}

async fn find(state: &AppState, id: &str) -> ApiResult<Skill> {
    match state.store.find_skill(id).await {
        Ok(Some(skill)) => Ok(ApiResponse::success(skill)),
        Ok(None) => Err(ApiError::not_found("Skill not found")),
        Err(e) => Err(ApiError::persistence(Operation::Select, Resource::Skill, e)),
    }
}

async fn update(state: &AppState, id: &str, changes: SkillChanges) -> ApiResult<Skill> {
    // A missing row surfaces as the generic update failure, not a 404
    let skill = state
        .store
        .update_skill(id, changes)
        .await
        .map_err(|e| ApiError::persistence(Operation::Update, Resource::Skill, e))?;

    tracing::info!(id = %skill.id, "skill updated");
    Ok(ApiResponse::success(skill))
}

async fn remove(state: &AppState, id: &str) -> ApiResult<Message> {
    state
        .store
        .delete_skill(id)
        .await
        .map_err(|e| ApiError::persistence(Operation::Delete, Resource::Skill, e))?;

    tracing::info!(id = %id, "skill deleted");
    Ok(ApiResponse::success(Message::new("Skill deleted successfully")))
}
