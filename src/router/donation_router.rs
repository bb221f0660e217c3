use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handler::donation_handler::{
    create_donation_request_handler, delete_donation_request_handler,
    get_donation_request_handler, list_donation_requests_handler,
    update_donation_request_handler,
};
use crate::middlewares::auth_middleware::{verify_token, AuthState};
use crate::service::donation_service::DonationServiceImpl;

pub fn donation_router(service: Arc<DonationServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Listing and reads are open; the filter is built from query parameters
    let public = Router::new()
        .route("/donation-requests", get(list_donation_requests_handler))
        .route("/donation-requests/:id", get(get_donation_request_handler));

    // Mutations require a verified token
    let authenticated = Router::new()
        .route("/donation-requests", post(create_donation_request_handler))
        .route("/donation-requests/:id", patch(update_donation_request_handler))
        .route("/donation-requests/:id", delete(delete_donation_request_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public.merge(authenticated).with_state(service)
}
