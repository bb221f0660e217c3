use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    Extension,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::blog_dto::{CreateBlogRequest, ListBlogsQuery, UpdateBlogRequest};
use crate::model::blog::BlogAuthor;
use crate::service::blog_service::{BlogService, BlogServiceImpl};
use crate::service::user_service::RoleFlags;
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

pub async fn create_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let author = BlogAuthor {
        name: claims.displayName.clone(),
        email: claims.email.clone(),
    };
    let created = service.create(author, payload).await?;
    Ok(Json(created))
}

pub async fn list_blogs_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Query(query): Query<ListBlogsQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let blogs = service.list(query).await?;
    Ok(Json(blogs))
}

pub async fn get_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let blog = service.get(&id).await?;
    Ok(Json(blog))
}

// Ownership-gated: donors may only update their own posts
pub async fn update_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Extension(roles): Extension<RoleFlags>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let modified = service.update(&id, &claims.email, roles, payload).await?;
    Ok(Json(serde_json::json!({ "modifiedCount": modified })))
}

// Ownership-gated: donors may only delete their own posts
pub async fn delete_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Extension(roles): Extension<RoleFlags>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let deleted = service.delete(&id, &claims.email, roles).await?;
    Ok(Json(serde_json::json!({ "deletedCount": deleted, "id": id })))
}
