use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::database::models::{JobCreate, JobUpdate};
use crate::error::ApiError;
use crate::filter::JobFilter;
use crate::middleware::AuthUser;
use crate::services::JobService;

/// GET /jobs - List jobs, with optional title/salary/equity filters
pub async fn list(Query(filter): Query<JobFilter>) -> Result<Json<Value>, ApiError> {
    let jobs = JobService::new().await?.find_all(&filter).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// GET /jobs/:id - One job by id
pub async fn show(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let job = JobService::new().await?.get(id).await?;
    Ok(Json(json!({ "job": job })))
}

/// POST /jobs - Create a job (auth required)
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(data): Json<JobCreate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tracing::info!(user = %user.username, title = %data.title, "creating job");
    let job = JobService::new().await?.create(data).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// PATCH /jobs/:id - Partial update (auth required)
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(data): Json<JobUpdate>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(user = %user.username, id, "updating job");
    let job = JobService::new().await?.update(id, data).await?;
    Ok(Json(json!({ "job": job })))
}

/// DELETE /jobs/:id - Delete a job (auth required)
pub async fn remove(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(user = %user.username, id, "deleting job");
    JobService::new().await?.remove(id).await?;
    Ok(Json(json!({ "deleted": id })))
}
