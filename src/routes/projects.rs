use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectPatch};
use crate::routes::response::{created, ok, ApiJson, Envelope};
use crate::state::SharedState;
use crate::store;

pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<Project>>>, AppError> {
    let projects = state.store.list().await?;
    Ok(ok(projects))
}

pub async fn create(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<NewProject>,
) -> Result<(StatusCode, Json<Envelope<Project>>), AppError> {
    let project = store::create_project(state.store.as_ref(), req).await?;
    Ok(created(project))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Project>>, AppError> {
    let id = store::parse_id(&id)?;
    let project = store::get_project(state.store.as_ref(), id).await?;
    Ok(ok(project))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ProjectPatch>,
) -> Result<Json<Envelope<Project>>, AppError> {
    let id = store::parse_id(&id)?;
    let project = store::update_project(state.store.as_ref(), id, req).await?;
    Ok(ok(project))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    let id = store::parse_id(&id)?;
    store::delete_project(state.store.as_ref(), id).await?;
    Ok(ok(json!({})))
}

pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
