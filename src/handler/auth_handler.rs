use axum::{
    extract::{Json, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Extension,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::auth_dto::{TokenIssuedResponse, TokenRequest, VerifyTokenResponse};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::cookie::{clear_verification_cookie, verification_cookie};
use crate::util::error::HandlerError;
use crate::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl};

/// State of the token endpoints: signing utils plus the cookie environment
/// switch.
pub struct AuthApi {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_service: Arc<UserServiceImpl>,
    pub production: bool,
}

// Issue a verification token and set it as an httpOnly cookie
pub async fn generate_token_handler(
    State(api): State<Arc<AuthApi>>,
    Json(payload): Json<TokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let token = api
        .jwt_utils
        .generate_verification_token(&payload.displayName, &payload.email)
        .map_err(|e| HandlerError::internal(format!("Failed to sign token: {}", e)))?;
    let cookie = verification_cookie(
        &token,
        api.jwt_utils.jwt_config.token_expiration_minutes,
        api.production,
    );
    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(TokenIssuedResponse {
            success: true,
            message: "Verification token issued".to_string(),
        }),
    ))
}

// Expire the cookie
pub async fn clear_token_handler(
    State(api): State<Arc<AuthApi>>,
) -> Result<impl IntoResponse, HandlerError> {
    let cookie = clear_verification_cookie(api.production);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(TokenIssuedResponse {
            success: true,
            message: "Verification token cleared".to_string(),
        }),
    ))
}

// Report whether the current cookie verifies; the claims come back on success.
// A failing cookie is also cleared so the browser stops resending it.
pub async fn verify_token_handler(
    State(api): State<Arc<AuthApi>>,
    headers: axum::http::HeaderMap,
) -> axum::response::Response {
    let claims = crate::util::cookie::extract_verification_token(&headers)
        .and_then(|token| api.jwt_utils.validate_verification_token(&token).ok());
    match claims {
        Some(claims) => Json(VerifyTokenResponse {
            success: true,
            displayName: Some(claims.displayName),
            email: Some(claims.email),
        })
        .into_response(),
        None => {
            let cookie = clear_verification_cookie(api.production);
            (
                StatusCode::UNAUTHORIZED,
                AppendHeaders([(SET_COOKIE, cookie.to_string())]),
                Json(VerifyTokenResponse {
                    success: false,
                    displayName: None,
                    email: None,
                }),
            )
                .into_response()
        }
    }
}

// Full user record for the verified claim email (behind verify_token)
pub async fn my_profile_handler(
    State(api): State<Arc<AuthApi>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = api
        .user_service
        .get_by_email(&claims.email)
        .await?
        .ok_or_else(|| HandlerError::unauthorized("Unknown user"))?;
    Ok(Json(user))
}
