use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    Extension,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::user_dto::{
    AdminUpdateUserRequest, ListUsersQuery, RegisterUserRequest, UpdateProfileRequest,
};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

// Register (existing-user aware)
pub async fn register_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.register(payload).await?;
    Ok(Json(res))
}

// List users (admin only)
pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list(query).await?;
    Ok(Json(users))
}

// Get user by id (admin only)
pub async fn get_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = service.get_by_id(&id).await?;
    Ok(Json(user))
}

// Self-service profile update, keyed by the verified token email
pub async fn update_profile_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let modified = service.update_profile(&claims.email, payload).await?;
    Ok(Json(serde_json::json!({ "modifiedCount": modified })))
}

// Admin update by id, whitelisted fields only
pub async fn admin_update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let modified = service.admin_update(&id, payload).await?;
    Ok(Json(serde_json::json!({ "modifiedCount": modified })))
}
