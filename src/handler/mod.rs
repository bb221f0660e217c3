pub mod user_handler;
pub mod donation_handler;
pub mod blog_handler;
pub mod reference_handler;
pub mod stats_handler;
pub mod auth_handler;
