pub mod user_dto;
pub mod donation_dto;
pub mod blog_dto;
pub mod auth_dto;
pub mod stats_dto;
