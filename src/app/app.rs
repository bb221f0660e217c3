use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::{AppConfig, CorsConfig, JwtConfig, MongoConfig};
use crate::handler::auth_handler::AuthApi;
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::blog_repo::MongoBlogRepository;
use crate::repository::donation_request_repo::MongoDonationRequestRepository;
use crate::repository::donor_repo::MongoDonorRepository;
use crate::repository::reference_repo::MongoReferenceRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::auth_router::auth_router;
use crate::router::blog_router::blog_router;
use crate::router::donation_router::donation_router;
use crate::router::reference_router::reference_router;
use crate::router::stats_router::stats_router;
use crate::router::user_router::user_router;
use crate::service::blog_service::BlogServiceImpl;
use crate::service::donation_service::DonationServiceImpl;
use crate::service::stats_service::StatsServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let cors_config = CorsConfig::from_env();

        // One store connection for the whole process, injected into every
        // repository.
        let db = crate::repository::connect(&mongo_config)
            .await
            .expect("Failed to connect to MongoDB");

        let user_repo = Arc::new(MongoUserRepository::new(&db));
        let request_repo = Arc::new(MongoDonationRequestRepository::new(&db));
        let blog_repo = Arc::new(MongoBlogRepository::new(&db));
        let donor_repo = Arc::new(MongoDonorRepository::new(&db));
        let reference_repo = Arc::new(MongoReferenceRepository::new(&db));

        let user_service = Arc::new(UserServiceImpl::new(user_repo.clone() as _));
        let donation_service = Arc::new(DonationServiceImpl::new(
            request_repo.clone() as _,
            donor_repo as _,
        ));
        let blog_service = Arc::new(BlogServiceImpl::new(blog_repo as _));
        let stats_service = Arc::new(StatsServiceImpl::new(
            user_repo as _,
            request_repo as _,
        ));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
            user_service: user_service.clone(),
        });
        let auth_api = Arc::new(AuthApi {
            jwt_utils,
            user_service: user_service.clone(),
            production: config.production,
        });

        let router = Router::new()
            .merge(user_router(user_service, auth_state.clone()))
            .merge(donation_router(donation_service, auth_state.clone()))
            .merge(blog_router(blog_service, auth_state.clone()))
            .merge(reference_router(reference_repo as _))
            .merge(stats_router(stats_service, auth_state.clone()))
            .merge(auth_router(auth_api, auth_state))
            .route("/", get(|| async { "Server is running.." }))
            .layer(cors_layer(&cors_config));

        App { config, router }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}

// Allowlist restricted to the fixed development/production origin pair; cookies
// require credentials and explicit origins.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
