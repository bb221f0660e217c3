use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::{middleware, routing::get, Extension, Router};
use bson::{oid::ObjectId, Document};
use serde_json::json;
use tower::ServiceExt; // for .oneshot()

use donorlink_backend::config::JwtConfig;
use donorlink_backend::handler::auth_handler::AuthApi;
use donorlink_backend::router::auth_router::auth_router;
use donorlink_backend::middlewares::auth_middleware::{
    require_admin, verify_token, verify_user_role, AuthState,
};
use donorlink_backend::model::user::User;
use donorlink_backend::repository::repository_error::RepositoryResult;
use donorlink_backend::repository::user_repo::UserRepository;
use donorlink_backend::router::user_router::user_router;
use donorlink_backend::service::user_service::UserServiceImpl;
use donorlink_backend::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl};

#[derive(Default)]
struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    fn seed(users: Vec<User>) -> Self {
        InMemoryUserRepo { users: Mutex::new(users) }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = bson::DateTime::now();
        user.createdAt = Some(now);
        user.lastModifiedAt = Some(now);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn list(&self, filter: Document) -> RepositoryResult<Vec<User>> {
        let email = filter.get_str("email").ok().map(|s| s.to_string());
        let status = filter.get_str("status").ok().map(|s| s.to_string());
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| email.as_deref().map(|e| u.email == e).unwrap_or(true))
            .filter(|u| status.as_deref().map(|s| u.status == s).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: ObjectId, _patch: Document) -> RepositoryResult<u64> {
        let matched = self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id.as_ref() == Some(&id));
        Ok(if matched { 1 } else { 0 })
    }

    async fn update_by_email(&self, email: &str, _patch: Document) -> RepositoryResult<u64> {
        let matched = self.users.lock().unwrap().iter().any(|u| u.email == email);
        Ok(if matched { 1 } else { 0 })
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn count_created_between(
        &self,
        from: bson::DateTime,
        to: bson::DateTime,
    ) -> RepositoryResult<u64> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.createdAt.map(|c| c >= from && c < to).unwrap_or(false))
            .count() as u64)
    }
}

fn test_user(email: &str, role: &str) -> User {
    User {
        id: Some(ObjectId::new()),
        name: "Test User".to_string(),
        email: email.to_string(),
        photoURL: "https://example.com/p.png".to_string(),
        district: "Dhaka".to_string(),
        upazila: "Savar".to_string(),
        bloodGroup: "O+".to_string(),
        role: role.to_string(),
        status: "active".to_string(),
        createdAt: Some(bson::DateTime::now()),
        lastModifiedAt: Some(bson::DateTime::now()),
    }
}

fn auth_state(repo: InMemoryUserRepo) -> (Arc<AuthState>, Arc<JwtTokenUtilsImpl>, Arc<UserServiceImpl>) {
    let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::from_test_env()));
    let user_service = Arc::new(UserServiceImpl::new(Arc::new(repo)));
    let state = Arc::new(AuthState {
        jwt_utils: jwt_utils.clone(),
        user_service: user_service.clone(),
    });
    (state, jwt_utils, user_service)
}

fn cookie_for(jwt_utils: &JwtTokenUtilsImpl, name: &str, email: &str) -> String {
    let token = jwt_utils.generate_verification_token(name, email).unwrap();
    format!("verification_token={}", token)
}

fn protected_router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route(
            "/protected",
            get(|Extension(claims): Extension<Claims>| async move { claims.email }),
        )
        .route_layer(middleware::from_fn_with_state(state, verify_token))
}

fn admin_router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/admin-only", get(|| async { "ok" }))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), verify_user_role))
        .route_layer(middleware::from_fn_with_state(state, verify_token))
}

#[tokio::test]
async fn test_missing_cookie_is_unauthorized() {
    let (state, _, _) = auth_state(InMemoryUserRepo::default());
    let app = protected_router(state);

    let req = Request::builder().uri("/protected").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_cookie_is_unauthorized() {
    let (state, _, _) = auth_state(InMemoryUserRepo::default());
    let app = protected_router(state);

    let req = Request::builder()
        .uri("/protected")
        .header("cookie", "verification_token=garbage")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_cookie_reaches_handler_with_claims() {
    let (state, jwt_utils, _) = auth_state(InMemoryUserRepo::default());
    let app = protected_router(state);

    let req = Request::builder()
        .uri("/protected")
        .header("cookie", cookie_for(&jwt_utils, "Rahim", "rahim@example.com"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"rahim@example.com");
}

#[tokio::test]
async fn test_admin_gate_allows_admin() {
    let repo = InMemoryUserRepo::seed(vec![test_user("admin@example.com", "admin")]);
    let (state, jwt_utils, _) = auth_state(repo);
    let app = admin_router(state);

    let req = Request::builder()
        .uri("/admin-only")
        .header("cookie", cookie_for(&jwt_utils, "Admin", "admin@example.com"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_gate_rejects_donor_with_forbidden() {
    let repo = InMemoryUserRepo::seed(vec![test_user("donor@example.com", "donor")]);
    let (state, jwt_utils, _) = auth_state(repo);
    let app = admin_router(state);

    let req = Request::builder()
        .uri("/admin-only")
        .header("cookie", cookie_for(&jwt_utils, "Donor", "donor@example.com"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_resolution_rejects_unknown_user() {
    let (state, jwt_utils, _) = auth_state(InMemoryUserRepo::default());
    let app = admin_router(state);

    let req = Request::builder()
        .uri("/admin-only")
        .header("cookie", cookie_for(&jwt_utils, "Ghost", "ghost@example.com"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

fn token_router(state: Arc<AuthState>, jwt_utils: Arc<JwtTokenUtilsImpl>, user_service: Arc<UserServiceImpl>) -> Router {
    let api = Arc::new(AuthApi {
        jwt_utils,
        user_service,
        production: false,
    });
    auth_router(api, state)
}

#[tokio::test]
async fn test_verify_token_endpoint_accepts_valid_cookie() {
    let (state, jwt_utils, user_service) = auth_state(InMemoryUserRepo::default());
    let app = token_router(state, jwt_utils.clone(), user_service);

    let req = Request::builder()
        .method("POST")
        .uri("/jwt/verify-token")
        .header("cookie", cookie_for(&jwt_utils, "Rahim", "rahim@example.com"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["email"], json!("rahim@example.com"));
}

#[tokio::test]
async fn test_verify_token_endpoint_clears_invalid_cookie() {
    let (state, jwt_utils, user_service) = auth_state(InMemoryUserRepo::default());
    let app = token_router(state, jwt_utils, user_service);

    let req = Request::builder()
        .method("POST")
        .uri("/jwt/verify-token")
        .header("cookie", "verification_token=garbage")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The dead cookie comes back expired so the browser drops it
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie header should be present");
    assert!(set_cookie.starts_with("verification_token="));
    assert!(set_cookie.contains("Max-Age=0"));

    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_register_twice_returns_existing_user_without_duplicate() {
    let (state, _, user_service) = auth_state(InMemoryUserRepo::default());
    let app = user_router(user_service.clone(), state);

    let payload = json!({
        "name": "Ayesha",
        "email": "a@x.com",
        "district": "Dhaka",
        "upazila": "Savar",
        "bloodGroup": "A+"
    });

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(first.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["isExistingUser"], json!(false));
    assert!(body["insertedId"].is_string());

    let second = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(second.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["isExistingUser"], json!(true));
    assert_eq!(body["insertedId"], json!(null));

    // No duplicate record was created
    let users = user_service.user_repo.find_by_email("a@x.com").await.unwrap();
    assert!(users.is_some());
    assert_eq!(user_service.user_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_registration_never_persists_client_role_or_status() {
    let (_, _, user_service) = auth_state(InMemoryUserRepo::default());
    use donorlink_backend::dto::user_dto::RegisterUserRequest;
    use donorlink_backend::service::user_service::UserService;

    let request = RegisterUserRequest {
        name: "Karim".to_string(),
        email: "karim@x.com".to_string(),
        photoURL: None,
        district: "Dhaka".to_string(),
        upazila: "Savar".to_string(),
        bloodGroup: "B+".to_string(),
    };
    user_service.register(request).await.unwrap();

    let stored = user_service.user_repo.find_by_email("karim@x.com").await.unwrap().unwrap();
    assert_eq!(stored.role, "donor");
    assert_eq!(stored.status, "active");
    // Absent photo falls back to the placeholder
    assert!(!stored.photoURL.is_empty());
}
