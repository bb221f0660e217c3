use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handler::blog_handler::{
    create_blog_handler, delete_blog_handler, get_blog_handler, list_blogs_handler,
    update_blog_handler,
};
use crate::middlewares::auth_middleware::{verify_token, verify_user_role, AuthState};
use crate::service::blog_service::BlogServiceImpl;

pub fn blog_router(service: Arc<BlogServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/blogs", get(list_blogs_handler))
        .route("/blogs/:id", get(get_blog_handler));

    // Creation needs identity only; the author comes from the claims
    let authenticated = Router::new()
        .route("/blogs", post(create_blog_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_token));

    // Mutations additionally resolve the role so the ownership check can tell
    // donors apart from admin/volunteer
    let ownership_gated = Router::new()
        .route("/blogs/:id", patch(update_blog_handler))
        .route("/blogs/:id", delete(delete_blog_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_user_role))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public.merge(authenticated).merge(ownership_gated).with_state(service)
}
