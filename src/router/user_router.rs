use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handler::user_handler::{
    admin_update_user_handler, get_user_handler, list_users_handler, register_user_handler,
    update_profile_handler,
};
use crate::middlewares::auth_middleware::{require_admin, verify_token, verify_user_role, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Public registration (existing-user aware)
    let public = Router::new().route("/users", post(register_user_handler));

    // Self-update needs only a verified token
    let authenticated = Router::new()
        .route("/users", patch(update_profile_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_token));

    // Admin-gated listing and per-user management. Layers run outermost last
    // added: verify_token -> verify_user_role -> require_admin.
    let admin = Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/:id", get(get_user_handler))
        .route("/users/update/:id", patch(admin_update_user_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_user_role))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public.merge(authenticated).merge(admin).with_state(service)
}
