use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::handler::stats_handler::statistics_handler;
use crate::middlewares::auth_middleware::{require_admin, verify_token, verify_user_role, AuthState};
use crate::service::stats_service::StatsServiceImpl;

pub fn stats_router(service: Arc<StatsServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/admin/statistics", get(statistics_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_user_role))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token))
        .with_state(service)
}
