use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    Extension,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::donation_dto::{
    CreateDonationRequest, ListDonationRequestsQuery, UpdateDonationRequest,
};
use crate::service::donation_service::{DonationService, DonationServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

// Create (authenticated requester)
pub async fn create_donation_request_handler(
    State(service): State<Arc<DonationServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateDonationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let created = service.create(&claims.email, payload).await?;
    Ok(Json(created))
}

// List with filtering, sorting and result-count limiting
pub async fn list_donation_requests_handler(
    State(service): State<Arc<DonationServiceImpl>>,
    Query(query): Query<ListDonationRequestsQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let requests = service.list(query).await?;
    Ok(Json(requests))
}

pub async fn get_donation_request_handler(
    State(service): State<Arc<DonationServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let request = service.get(&id).await?;
    Ok(Json(request))
}

// Merge-patch with upsert semantics
pub async fn update_donation_request_handler(
    State(service): State<Arc<DonationServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDonationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let outcome = service.update(&id, payload).await?;
    Ok(Json(outcome))
}

pub async fn delete_donation_request_handler(
    State(service): State<Arc<DonationServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let outcome = service.delete(&id).await?;
    Ok(Json(outcome))
}
