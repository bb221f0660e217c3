use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::auth_handler::{
    clear_token_handler, generate_token_handler, my_profile_handler, verify_token_handler, AuthApi,
};
use crate::middlewares::auth_middleware::{verify_token, AuthState};

pub fn auth_router(api: Arc<AuthApi>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/jwt/generate-verification-token", post(generate_token_handler))
        .route("/jwt/clear-verification-token", post(clear_token_handler))
        .route("/jwt/verify-token", post(verify_token_handler));

    let authenticated = Router::new()
        .route("/get-myProfile", get(my_profile_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public.merge(authenticated).with_state(api)
}
