pub mod model;
pub mod repository;
pub mod config;
pub mod util;
pub mod dto;
pub mod service;
pub mod handler;
pub mod router;
pub mod middlewares;
pub mod app;
