use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};

use super::IdQuery;
use crate::api::payload::{ProjectPatch, ProjectPayload};
use crate::database::models::{Project, ProjectChanges};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;
use crate::types::{Operation, Resource};
use crate::validation::Validate;

/// GET /api/projects - all projects newest first, or one with `?id=`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    if let Some(id) = query.id {
        return Ok(find(&state, &id).await?.into_response());
    }

    let projects = state
        .store
        .list_projects()
        .await
        .map_err(|e| ApiError::persistence_list(Resource::Project, e))?;

    Ok(ApiResponse::success(projects).into_response())
}

/// GET /api/projects/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Project> {
    find(&state, &id).await
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Project> {
    let Json(payload) = payload?;
    let project = payload.validate()?;

    let created = state
        .store
        .create_project(project)
        .await
        .map_err(|e| ApiError::persistence(Operation::Create, Resource::Project, e))?;

    tracing::info!(id = %created.id, title = %created.title, "project created");
    Ok(ApiResponse::created(created))
}

/// PUT /api/projects?id=X - full update
pub async fn replace_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Project> {
    let Query(query) = query?;
    let id = query.require(Resource::Project)?;
    let Json(payload) = payload?;
    update(&state, &id, payload.validate()?.into()).await
}

/// PATCH /api/projects?id=X - full update, same rules as PUT
pub async fn patch_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Project> {
    let Query(query) = query?;
    let id = query.require(Resource::Project)?;
    let Json(payload) = payload?;
    update(&state, &id, payload.validate()?.into()).await
}

/// DELETE /api/projects?id=X
pub async fn delete_by_query(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    let id = query.require(Resource::Project)?;
    remove(&state, &id).await
}

/// PUT /api/projects/:id
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Project> {
    let Json(payload) = payload?;
    update(&state, &id, payload.validate()?.into()).await
}

/// PATCH /api/projects/:id - partial update
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Project> {
    let Json(payload) = payload?;
    update(&state, &id, ProjectPatch(payload).validate()?).await
}

/// DELETE /api/projects/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Message> {
    remove(&state, &id).await
}

async fn find(state: &AppState, id: &str) -> ApiResult<Project> {
    match state.store.find_project(id).await {
        Ok(Some(project)) => Ok(ApiResponse::success(project)),
        Ok(None) => Err(ApiError::not_found("Project not found")),
        Err(e) => Err(ApiError::persistence(Operation::Select, Resource::Project, e)),
    }
}

async fn update(state: &AppState, id: &str, changes: ProjectChanges) -> ApiResult<Project> {
    // A missing row surfaces as the generic update failure, not a 404
    let project = state
        .store
        .update_project(id, changes)
        .await
        .map_err(|e| ApiError::persistence(Operation::Update, Resource::Project, e))?;

    tracing::info!(id = %project.id, "project updated");
    Ok(ApiResponse::success(project))
}

async fn remove(state: &AppState, id: &str) -> ApiResult<Message> {
    state
        .store
        .delete_project(id)
        .await
        .map_err(|e| ApiError::persistence(Operation::Delete, Resource::Project, e))?;

    tracing::info!(id = %id, "project deleted");
    Ok(ApiResponse::success(Message::new("Project deleted successfully")))
}
