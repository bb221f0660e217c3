use serde::{Deserialize, Serialize};
use validator::Validate;

#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 64))]
    pub displayName: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenIssuedResponse {
    pub success: bool,
    pub message: String,
}

#[allow(non_snake_case)]
#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub displayName: Option<String>,
    pub email: Option<String>,
}
