use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::reference_handler::{
    get_district_handler, get_upazila_handler, list_districts_handler, list_upazilas_handler,
};
use crate::repository::reference_repo::ReferenceRepository;

pub fn reference_router(repo: Arc<dyn ReferenceRepository>) -> Router {
    Router::new()
        .route("/districts", get(list_districts_handler))
        .route("/districts/:id", get(get_district_handler))
        .route("/upazilas", get(list_upazilas_handler))
        .route("/upazilas/:id", get(get_upazila_handler))
        .with_state(repo)
}
