use std::sync::Arc;

use crate::{
    auth::{Requester, UserRole},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use pure_hearts_core::{
    projects::{FeaturedProject, NewProject, Project},
    utils::time_utils::local_today,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct FeaturedQuery {
    limit: Option<usize>,
}

async fn get_featured_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<Json<Vec<FeaturedProject>>> {
    let limit = query.limit.unwrap_or(state.featured_limit);
    let projects = state
        .project_service
        .get_featured_projects_with_totals(limit, local_today())?;
    Ok(Json(projects))
}

async fn get_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<FeaturedProject>> {
    let project = state
        .project_service
        .get_project_details(&id, local_today())?;
    Ok(Json(project))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    Json(payload): Json<NewProject>,
) -> ApiResult<Json<Project>> {
    let organization_id = requester.require(UserRole::Organization)?;
    let project = state
        .project_service
        .create_project(organization_id, payload)
        .await?;
    Ok(Json(project))
}

async fn get_organization_projects(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> ApiResult<Json<Vec<FeaturedProject>>> {
    let organization_id = requester.require(UserRole::Organization)?;
    let projects = state
        .project_service
        .get_organization_projects(organization_id, local_today())?;
    Ok(Json(projects))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/featured", get(get_featured_projects))
        .route("/projects/{id}", get(get_project))
        .route("/organizations/me/projects", get(get_organization_projects))
}
