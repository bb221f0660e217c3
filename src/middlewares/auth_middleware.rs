use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::warn;

use crate::service::user_service::{RoleFlags, UserService, UserServiceImpl};
use crate::util::cookie::extract_verification_token;
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

/// Shared state of the auth stages. Stages are composed per route; each one
/// either continues with an enriched request or short-circuits with an error
/// response.
pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_service: Arc<UserServiceImpl>,
}

/// Stage 1: verify the token cookie. 401 when the cookie is absent or the
/// signature/expiry check fails. On success the decoded claims are attached to
/// the request extensions for downstream stages.
pub async fn verify_token(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let token = extract_verification_token(req.headers())
        .ok_or_else(|| HandlerError::unauthorized("Verification token cookie is missing"))?;

    let claims = state.jwt_utils.validate_verification_token(&token).map_err(|e| {
        warn!("Token verification failed: {}", e);
        HandlerError::unauthorized("Invalid or expired verification token")
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Stage 2: resolve the role of the verified user. Must run after
/// `verify_token`. 401 when the user record no longer exists. The resolved
/// flags are attached alongside the claims.
pub async fn verify_user_role(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let claims = req
        .extensions()
        .get::<crate::util::jwt::Claims>()
        .cloned()
        .ok_or_else(|| HandlerError::unauthorized("Token must be verified first"))?;

    let user = state
        .user_service
        .get_by_email(&claims.email)
        .await
        .map_err(|e| HandlerError::internal(e.to_string()))?
        .ok_or_else(|| {
            warn!("No user record for verified email: {}", claims.email);
            HandlerError::unauthorized("Unknown user")
        })?;

    req.extensions_mut().insert(RoleFlags::from_role(&user.role));
    Ok(next.run(req).await)
}

/// Stage 3: admin gate. Must run after `verify_user_role`. 403 for any
/// authenticated non-admin; the role always comes from the store, keyed by the
/// verified token email.
pub async fn require_admin(
    State(_state): State<Arc<AuthState>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let roles = req
        .extensions()
        .get::<RoleFlags>()
        .copied()
        .ok_or_else(|| HandlerError::unauthorized("Role must be resolved first"))?;

    if !roles.is_admin {
        return Err(HandlerError::forbidden("Admin access required"));
    }
    Ok(next.run(req).await)
}
