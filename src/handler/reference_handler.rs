use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::model::reference::{SHEET_DISTRICTS, SHEET_UPAZILAS};
use crate::repository::reference_repo::ReferenceRepository;
use crate::util::error::HandlerError;

/// Item misses answer with this sentinel and HTTP 200, not a 404 status.
fn not_found_sentinel() -> serde_json::Value {
    serde_json::json!({ "success": false, "message": "Data Not Found" })
}

async fn list_sheet(
    repo: &dyn ReferenceRepository,
    name: &str,
) -> Result<axum::response::Response, HandlerError> {
    let sheet = repo
        .load_sheet(name)
        .await
        .map_err(|e| HandlerError::internal(e.to_string()))?;
    match sheet {
        Some(sheet) => Ok(Json(sheet.data).into_response()),
        None => Ok(Json(not_found_sentinel()).into_response()),
    }
}

async fn get_sheet_item(
    repo: &dyn ReferenceRepository,
    name: &str,
    id: &str,
) -> Result<axum::response::Response, HandlerError> {
    let item = repo
        .find_item(name, id)
        .await
        .map_err(|e| HandlerError::internal(e.to_string()))?;
    match item {
        Some(item) => Ok(Json(item).into_response()),
        None => Ok(Json(not_found_sentinel()).into_response()),
    }
}

pub async fn list_districts_handler(
    State(repo): State<Arc<dyn ReferenceRepository>>,
) -> Result<impl IntoResponse, HandlerError> {
    list_sheet(repo.as_ref(), SHEET_DISTRICTS).await
}

pub async fn get_district_handler(
    State(repo): State<Arc<dyn ReferenceRepository>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    get_sheet_item(repo.as_ref(), SHEET_DISTRICTS, &id).await
}

pub async fn list_upazilas_handler(
    State(repo): State<Arc<dyn ReferenceRepository>>,
) -> Result<impl IntoResponse, HandlerError> {
    list_sheet(repo.as_ref(), SHEET_UPAZILAS).await
}

pub async fn get_upazila_handler(
    State(repo): State<Arc<dyn ReferenceRepository>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    get_sheet_item(repo.as_ref(), SHEET_UPAZILAS, &id).await
}
