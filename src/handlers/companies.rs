use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::database::models::{CompanyCreate, CompanyUpdate};
use crate::error::ApiError;
use crate::filter::CompanyFilter;
use crate::middleware::AuthUser;
use crate::services::CompanyService;

/// GET /companies - List companies, with optional name/employee filters
pub async fn list(Query(filter): Query<CompanyFilter>) -> Result<Json<Value>, ApiError> {
    let companies = CompanyService::new().await?.find_all(&filter).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/:handle - One company with its jobs
pub async fn show(Path(handle): Path<String>) -> Result<Json<Value>, ApiError> {
    let company = CompanyService::new().await?.get(&handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// POST /companies - Create a company (auth required)
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(data): Json<CompanyCreate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tracing::info!(user = %user.username, handle = %data.handle, "creating company");
    let company = CompanyService::new().await?.create(data).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// PATCH /companies/:handle - Partial update (auth required)
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(handle): Path<String>,
    Json(data): Json<CompanyUpdate>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(user = %user.username, handle = %handle, "updating company");
    let company = CompanyService::new().await?.update(&handle, data).await?;
    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/:handle - Delete a company (auth required)
pub async fn remove(
    Extension(user): Extension<AuthUser>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(user = %user.username, handle = %handle, "deleting company");
    CompanyService::new().await?.remove(&handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}
