pub mod user_service;
pub mod donation_service;
pub mod blog_service;
pub mod stats_service;
