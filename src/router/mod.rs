pub mod user_router;
pub mod donation_router;
pub mod blog_router;
pub mod reference_router;
pub mod stats_router;
pub mod auth_router;
